//! Services module - the cross-referencing pipeline.
//!
//! Everything here works on already-parsed source data and has no knowledge
//! of the command line or configuration files.
//!
//! # Components
//!
//! - [`IdentityResolver`]: maps built from the shop XML files, linking a
//!   uniqueNameHash to its text label and component details
//! - [`EnrichmentEngine`]: merges the three sources into per-gender
//!   collections in three ordered passes:
//!   - metadata seeds one item per key
//!   - JSON overwrites IDs and names, or adds standalone items
//!   - XML builds outfits and fills only what is still empty
//! - [`pair_by_value`]: matches male and female items sharing a metadata value
//! - [`ReportWriter`]: renders the main report and the breakdown reports
//! - [`DumpPipeline`]: runs the stages above in order and writes the reports
//!
//! # Precedence
//!
//! Metadata provides key, gender, value and the initial DLC. XML provides the
//! hash to label bridge and outfit membership. JSON provides the trusted
//! numeric IDs and localized names, overwriting earlier values.
//!
//! # Usage Example
//!
//! ```ignore
//! use genderswap::services::DumpPipeline;
//!
//! let pipeline = DumpPipeline::new(config);
//! let outcome = pipeline.run()?;
//! println!("{} pairs", outcome.matched_pairs);
//! pipeline.metrics().log_summary();
//! ```

pub mod enrichment;
pub mod pairing;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use enrichment::{EnrichmentEngine, JsonLabelIndex};
pub use pairing::{GenderSwapPair, PairingSummary, pair_by_value};
pub use pipeline::{DumpPipeline, PipelineError, PipelineOutcome};
pub use report::{ReportError, ReportWriter, clean_component_type_name, write_report};
pub use resolver::IdentityResolver;
