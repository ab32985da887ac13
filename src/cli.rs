//! Command line arguments
//!
//! Flags override the loaded configuration for a single run; they are never
//! written back unless `--write-default-config` is given.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::models::DumpConfig;

#[derive(Parser, Debug)]
#[command(name = "genderswap")]
#[command(about = "Cross-reference clothing metadata, JSON and XML dumps into a gender swap report")]
#[command(version)]
pub struct Cli {
    /// Directory holding GenderSwap Config.yaml
    #[arg(long, default_value = ".")]
    pub config_dir: Utf8PathBuf,

    /// Script metadata file
    #[arg(long)]
    pub metadata: Option<Utf8PathBuf>,

    /// Directory of per-category JSON lookup files
    #[arg(long)]
    pub json_dir: Option<Utf8PathBuf>,

    /// Directory of shop XML files
    #[arg(long)]
    pub xml_dir: Option<Utf8PathBuf>,

    /// Directory the reports are written to
    #[arg(long, env = "GENDERSWAP_OUTPUT_DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Only write the main report
    #[arg(long)]
    pub no_breakdowns: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub debug: bool,

    /// Don't mirror the log to the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Save the effective configuration and exit
    #[arg(long)]
    pub write_default_config: bool,
}

impl Cli {
    /// Apply command line overrides to a loaded configuration
    pub fn apply_overrides(&self, config: &mut DumpConfig) {
        if let Some(path) = &self.metadata {
            config.sources.metadata_file = path.to_string();
        }
        if let Some(path) = &self.json_dir {
            config.sources.json_dir = path.to_string();
        }
        if let Some(path) = &self.xml_dir {
            config.sources.xml_dir = path.to_string();
        }
        if let Some(path) = &self.output_dir {
            config.output.directory = path.to_string();
        }
        if self.no_breakdowns {
            config.output.breakdown_reports = false;
        }
        if self.debug {
            config.logging.debug_mode = true;
        }
        if self.quiet {
            config.logging.console_output = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["genderswap"]).unwrap();
        let mut config = DumpConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.config_dir, Utf8PathBuf::from("."));
        assert_eq!(config.sources, DumpConfig::default().sources);
        assert_eq!(config.logging, DumpConfig::default().logging);
        assert_eq!(config.output.report_file, "clothing_dump.txt");
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "genderswap",
            "--metadata",
            "data/scriptmetadata.meta",
            "--json-dir",
            "data/json",
            "--xml-dir",
            "data/xml",
            "--output-dir",
            "reports",
            "--no-breakdowns",
            "--debug",
            "--quiet",
        ])
        .unwrap();

        let mut config = DumpConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.sources.metadata_file, "data/scriptmetadata.meta");
        assert_eq!(config.sources.json_dir, "data/json");
        assert_eq!(config.sources.xml_dir, "data/xml");
        assert_eq!(config.output.directory, "reports");
        assert!(!config.output.breakdown_reports);
        assert!(config.logging.debug_mode);
        assert!(!config.logging.console_output);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
