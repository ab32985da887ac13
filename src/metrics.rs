// Run metrics module
//
// Counts what each stage of a dump run read, linked, created and skipped

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters for a single dump run
///
/// Uses atomic operations so stages can record through a shared reference.
/// The summary is logged once at the end of the run.
#[derive(Debug)]
pub struct RunMetrics {
    /// Files found by directory scans
    pub files_scanned: AtomicUsize,

    /// Files parsed successfully
    pub files_parsed: AtomicUsize,

    /// Files skipped because they could not be read or parsed
    pub files_skipped: AtomicUsize,

    /// Script metadata entries accepted
    pub metadata_items: AtomicUsize,

    /// JSON lookup records read
    pub json_records: AtomicUsize,

    /// XML files kept after gender classification
    pub xml_nodes: AtomicUsize,

    /// XML files dropped because their pedName carries no gender marker
    pub xml_nodes_dropped: AtomicUsize,

    /// Metadata keys linked to a text label
    pub label_links: AtomicUsize,

    /// Metadata keys with no text label in the XML data
    pub lookup_misses: AtomicUsize,

    /// Existing items updated from a JSON record
    pub json_enrichments: AtomicUsize,

    /// Items created from a JSON record alone
    pub json_only_items: AtomicUsize,

    /// Items created from an XML record alone
    pub xml_only_items: AtomicUsize,

    /// Numeric fields that failed to parse
    pub int_parse_failures: AtomicUsize,

    /// Outfits assembled from XML outfit definitions
    pub outfits_built: AtomicUsize,

    start_time: Instant,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            files_scanned: AtomicUsize::new(0),
            files_parsed: AtomicUsize::new(0),
            files_skipped: AtomicUsize::new(0),
            metadata_items: AtomicUsize::new(0),
            json_records: AtomicUsize::new(0),
            xml_nodes: AtomicUsize::new(0),
            xml_nodes_dropped: AtomicUsize::new(0),
            label_links: AtomicUsize::new(0),
            lookup_misses: AtomicUsize::new(0),
            json_enrichments: AtomicUsize::new(0),
            json_only_items: AtomicUsize::new(0),
            xml_only_items: AtomicUsize::new(0),
            int_parse_failures: AtomicUsize::new(0),
            outfits_built: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_files_scanned(&self, count: usize) {
        self.files_scanned.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_file_parsed(&self) {
        self.files_parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_skipped(&self) {
        self.files_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_metadata_items(&self, count: usize) {
        self.metadata_items.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_json_records(&self, count: usize) {
        self.json_records.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_xml_node(&self) {
        self.xml_nodes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_xml_node_dropped(&self) {
        self.xml_nodes_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_label_link(&self) {
        self.label_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup_miss(&self) {
        self.lookup_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_json_enrichment(&self) {
        self.json_enrichments.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_json_only_item(&self) {
        self.json_only_items.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_xml_only_item(&self) {
        self.xml_only_items.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_int_parse_failure(&self) {
        self.int_parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outfit_built(&self) {
        self.outfits_built.fetch_add(1, Ordering::Relaxed);
    }

    /// Time since the run started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let load = |counter: &AtomicUsize| counter.load(Ordering::Relaxed);

        tracing::info!("=== Run Metrics Summary ===");
        tracing::info!("Elapsed: {:.2}s", self.elapsed().as_secs_f64());
        tracing::info!(
            "Files: {} scanned, {} parsed, {} skipped",
            load(&self.files_scanned),
            load(&self.files_parsed),
            load(&self.files_skipped)
        );
        tracing::info!(
            "Sources: {} metadata items, {} JSON records, {} XML nodes ({} dropped)",
            load(&self.metadata_items),
            load(&self.json_records),
            load(&self.xml_nodes),
            load(&self.xml_nodes_dropped)
        );
        tracing::info!(
            "Labels: {} linked, {} missing",
            load(&self.label_links),
            load(&self.lookup_misses)
        );
        tracing::info!(
            "Enrichment: {} JSON updates, {} JSON-only items, {} XML-only items, {} outfits",
            load(&self.json_enrichments),
            load(&self.json_only_items),
            load(&self.xml_only_items),
            load(&self.outfits_built)
        );
        if load(&self.int_parse_failures) > 0 {
            tracing::warn!(
                "Numeric parse failures: {}",
                load(&self.int_parse_failures)
            );
        }
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
