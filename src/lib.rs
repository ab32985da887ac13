// GenderSwap - clothing dump cross-referencer
//
// This is the library crate containing the readers, the enrichment pipeline and
// the report writer. The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod parsers;
pub mod reference;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::RunMetrics;
pub use models::{ClothingItem, DumpConfig, Gender, GenderCollections};
pub use services::{DumpPipeline, PipelineError, PipelineOutcome};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
