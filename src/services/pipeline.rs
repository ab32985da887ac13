use camino::Utf8PathBuf;
use std::fs;
use thiserror::Error;

use super::enrichment::EnrichmentEngine;
use super::report::{ReportError, ReportWriter, write_report};
use super::resolver::IdentityResolver;
use crate::metrics::RunMetrics;
use crate::models::{DumpConfig, Gender, GenderCollections};
use crate::parsers::{SourceError, load_sources};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{} report(s) could not be written: {}", .failed.len(), display_paths(.failed))]
    ReportsFailed { failed: Vec<Utf8PathBuf> },
}

fn display_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// What a successful run produced
#[derive(Debug)]
pub struct PipelineOutcome {
    pub collections: GenderCollections,
    pub matched_pairs: usize,
    pub male_only: usize,
    pub female_only: usize,
    pub reports_written: Vec<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy)]
enum ReportKind {
    Main,
    ItemsByDlc,
    ItemsByComponent,
    OutfitsByDlc,
}

impl ReportKind {
    fn render(self, writer: &ReportWriter) -> Result<String, ReportError> {
        match self {
            ReportKind::Main => writer.render_main_report(),
            ReportKind::ItemsByDlc => writer.render_items_by_dlc(),
            ReportKind::ItemsByComponent => writer.render_items_by_component(),
            ReportKind::OutfitsByDlc => writer.render_outfits_by_dlc(),
        }
    }
}

/// One dump run: read sources, resolve, enrich, pair and write reports
///
/// Each stage completes before the next starts. A missing source stops the
/// run before anything is written; a report that fails to write doesn't stop
/// the others.
pub struct DumpPipeline {
    config: DumpConfig,
    metrics: RunMetrics,
}

impl DumpPipeline {
    pub fn new(config: DumpConfig) -> Self {
        Self {
            config,
            metrics: RunMetrics::new(),
        }
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Read every source and build the enriched collections without writing
    /// anything.
    ///
    /// # Errors
    /// Any `SourceError` from the readers
    pub fn process(&self) -> Result<GenderCollections, PipelineError> {
        let sources = load_sources(&self.config.sources, &self.metrics)?;
        for gender in Gender::ALL {
            tracing::info!(
                "{} sources: {} metadata items, {} XML nodes",
                gender,
                sources.metadata_for(gender).count(),
                sources.xml_nodes_for(gender).count()
            );
        }

        let resolver = IdentityResolver::build(&sources.xml_nodes, &self.metrics);
        let collections = EnrichmentEngine::new(&sources, &resolver, &self.metrics).run();
        Ok(collections)
    }

    /// Run the whole pipeline and write the reports.
    ///
    /// # Errors
    /// `Source` when a source is missing or the metadata can't be parsed,
    /// `ReportsFailed` listing every report that couldn't be written
    pub fn run(&self) -> Result<PipelineOutcome, PipelineError> {
        let collections = self.process()?;
        let output = &self.config.output;

        let mut jobs = vec![(output.report_path(), ReportKind::Main)];
        if output.breakdown_reports {
            jobs.push((output.dlc_report_path(), ReportKind::ItemsByDlc));
            jobs.push((output.component_report_path(), ReportKind::ItemsByComponent));
            jobs.push((output.outfit_report_path(), ReportKind::OutfitsByDlc));
        }

        let output_dir = output.output_dir();
        if let Err(e) = fs::create_dir_all(&output_dir) {
            tracing::error!("Failed to create output directory {}: {}", output_dir, e);
            return Err(PipelineError::ReportsFailed {
                failed: jobs.into_iter().map(|(path, _)| path).collect(),
            });
        }

        let writer = ReportWriter::new(&collections);
        let mut reports_written = Vec::new();
        let mut failed = Vec::new();

        for (path, kind) in jobs {
            match kind.render(&writer).and_then(|text| write_report(&path, &text)) {
                Ok(()) => reports_written.push(path),
                Err(e) => {
                    tracing::error!("{:?} report not written: {}", kind, e);
                    failed.push(path);
                }
            }
        }

        let pairing = writer.pairing();
        let (matched_pairs, male_only, female_only) =
            (pairing.matched(), pairing.male_only, pairing.female_only);

        if !failed.is_empty() {
            return Err(PipelineError::ReportsFailed { failed });
        }

        tracing::info!(
            "Dump complete: {} pairs, {} reports written",
            matched_pairs,
            reports_written.len()
        );

        Ok(PipelineOutcome {
            collections,
            matched_pairs,
            male_only,
            female_only,
            reports_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use tempfile::TempDir;

    const METADATA: &str = r#"<CScriptMetadata>
  <MPApparelData>
    <MPApparelDataMale>
      <Item key="DLC_MP_GR_M_FEET_1_7" value="V1" />
    </MPApparelDataMale>
    <MPApparelDataFemale>
      <Item key="DLC_MP_GR_F_BERD_2_9" value="V1" />
    </MPApparelDataFemale>
  </MPApparelData>
</CScriptMetadata>"#;

    fn config_in(root: &Utf8Path) -> DumpConfig {
        fs::write(root.join("scriptmetadata.meta"), METADATA).unwrap();
        fs::create_dir_all(root.join("Jsonfiles")).unwrap();
        fs::create_dir_all(root.join("xmlfiles")).unwrap();

        let mut config = DumpConfig::default();
        config.sources.metadata_file = root.join("scriptmetadata.meta").into_string();
        config.sources.json_dir = root.join("Jsonfiles").into_string();
        config.sources.xml_dir = root.join("xmlfiles").into_string();
        config.output.directory = root.join("out").into_string();
        config
    }

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_run_writes_all_reports() {
        let (_temp_dir, root) = temp_root();
        let pipeline = DumpPipeline::new(config_in(&root));

        let outcome = pipeline.run().unwrap();

        assert_eq!(outcome.matched_pairs, 1);
        assert_eq!(outcome.reports_written.len(), 4);
        assert!(root.join("out/clothing_dump.txt").is_file());
        assert!(root.join("out/items_by_dlc.txt").is_file());
        assert!(root.join("out/items_by_component.txt").is_file());
        assert!(root.join("out/outfits_by_dlc.txt").is_file());
    }

    #[test]
    fn test_breakdowns_can_be_disabled() {
        let (_temp_dir, root) = temp_root();
        let mut config = config_in(&root);
        config.output.breakdown_reports = false;

        let outcome = DumpPipeline::new(config).run().unwrap();
        assert_eq!(outcome.reports_written, vec![root.join("out/clothing_dump.txt")]);
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let (_temp_dir, root) = temp_root();
        let mut config = config_in(&root);
        config.sources.xml_dir = root.join("absent").into_string();

        let err = DumpPipeline::new(config).run().unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Source(SourceError::SourceUnavailable(_))
        ));
        assert!(!root.join("out").exists());
    }

    #[test]
    fn test_report_failure_is_reported() {
        let (_temp_dir, root) = temp_root();
        let mut config = config_in(&root);
        // A directory where the DLC report file should go
        fs::create_dir_all(root.join("out/items_by_dlc.txt")).unwrap();
        config.output.breakdown_reports = true;

        let err = DumpPipeline::new(config).run().unwrap_err();

        match err {
            PipelineError::ReportsFailed { failed } => {
                assert_eq!(failed, vec![root.join("out/items_by_dlc.txt")]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The other reports were still attempted
        assert!(root.join("out/clothing_dump.txt").is_file());
        assert!(root.join("out/outfits_by_dlc.txt").is_file());
    }
}
