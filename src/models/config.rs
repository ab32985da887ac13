use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Run configuration from GenderSwap Config.yaml
///
/// Contains source locations, report file names, and logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(rename = "Sources", default)]
    pub sources: SourcesConfig,

    #[serde(rename = "Output", default)]
    pub output: OutputConfig,

    #[serde(rename = "Logging", default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(rename = "Script Metadata", default = "default_metadata_file")]
    pub metadata_file: String,

    #[serde(rename = "JSON Directory", default = "default_json_dir")]
    pub json_dir: String,

    #[serde(rename = "XML Directory", default = "default_xml_dir")]
    pub xml_dir: String,

    #[serde(rename = "JSON Extension", default = "default_json_extension")]
    pub json_extension: String,

    #[serde(rename = "XML Extension", default = "default_xml_extension")]
    pub xml_extension: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            metadata_file: default_metadata_file(),
            json_dir: default_json_dir(),
            xml_dir: default_xml_dir(),
            json_extension: default_json_extension(),
            xml_extension: default_xml_extension(),
        }
    }
}

impl SourcesConfig {
    pub fn metadata_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.metadata_file)
    }

    pub fn json_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.json_dir)
    }

    pub fn xml_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.xml_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "Directory", default = "default_output_dir")]
    pub directory: String,

    #[serde(rename = "Report File", default = "default_report_file")]
    pub report_file: String,

    #[serde(rename = "DLC Report File", default = "default_dlc_report_file")]
    pub dlc_report_file: String,

    #[serde(rename = "Component Report File", default = "default_component_report_file")]
    pub component_report_file: String,

    #[serde(rename = "Outfit Report File", default = "default_outfit_report_file")]
    pub outfit_report_file: String,

    #[serde(rename = "Breakdown Reports", default = "default_true")]
    pub breakdown_reports: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            report_file: default_report_file(),
            dlc_report_file: default_dlc_report_file(),
            component_report_file: default_component_report_file(),
            outfit_report_file: default_outfit_report_file(),
            breakdown_reports: true,
        }
    }
}

impl OutputConfig {
    pub fn output_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.directory)
    }

    pub fn report_path(&self) -> Utf8PathBuf {
        self.output_dir().join(&self.report_file)
    }

    pub fn dlc_report_path(&self) -> Utf8PathBuf {
        self.output_dir().join(&self.dlc_report_file)
    }

    pub fn component_report_path(&self) -> Utf8PathBuf {
        self.output_dir().join(&self.component_report_file)
    }

    pub fn outfit_report_path(&self) -> Utf8PathBuf {
        self.output_dir().join(&self.outfit_report_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(rename = "Log Directory", default = "default_log_dir")]
    pub log_dir: String,

    #[serde(rename = "Log Prefix", default = "default_log_prefix")]
    pub log_prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Console Output", default = "default_true")]
    pub console_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            debug_mode: false,
            console_output: true,
        }
    }
}

fn default_metadata_file() -> String {
    "scriptmetadata.meta".to_string()
}

fn default_json_dir() -> String {
    "Jsonfiles/".to_string()
}

fn default_xml_dir() -> String {
    "xmlfiles/".to_string()
}

fn default_json_extension() -> String {
    "json".to_string()
}

fn default_xml_extension() -> String {
    "meta".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_report_file() -> String {
    "clothing_dump.txt".to_string()
}

fn default_dlc_report_file() -> String {
    "items_by_dlc.txt".to_string()
}

fn default_component_report_file() -> String {
    "items_by_component.txt".to_string()
}

fn default_outfit_report_file() -> String {
    "outfits_by_dlc.txt".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "genderswap".to_string()
}

fn default_true() -> bool {
    true
}
