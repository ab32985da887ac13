//! GenderSwap - clothing dump cross-referencer
//!
//! Main entry point for the command line tool.
//!
//! # Overview
//!
//! Reads three exported data sets describing the multiplayer clothing
//! catalogue and writes a text report of male/female items that unlock each
//! other (they share the same script metadata value):
//!
//! - Script metadata (`scriptmetadata.meta`): key/value pairs per gender
//! - JSON lookup files (`Jsonfiles/`): drawable/texture IDs to localized names
//! - Shop XML files (`xmlfiles/`): outfits, components and props per DLC
//!
//! # Execution Flow
//!
//! 1. Parse command line arguments
//! 2. Load `GenderSwap Config.yaml` from the config directory (defaults if missing)
//! 3. Apply command line overrides
//! 4. Initialize logging -> logs/genderswap.<date>
//! 5. Run the dump pipeline and write the reports
//! 6. Log the run metrics
//!
//! A missing source or a report that can't be written makes the process exit
//! with a non-zero status.

use anyhow::Result;
use clap::Parser;
use genderswap::cli::Cli;
use genderswap::services::DumpPipeline;
use genderswap::{APP_NAME, ConfigManager, VERSION, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let mut config = config_manager.load_config()?;
    cli.apply_overrides(&mut config);

    let _guard = logging::setup_logging_with_console(
        &config.logging.log_dir,
        &config.logging.log_prefix,
        config.logging.debug_mode,
        config.logging.console_output,
    )?;

    tracing::info!("{} v{} starting", APP_NAME, VERSION);

    if cli.write_default_config {
        config_manager.save_config(&config)?;
        return Ok(());
    }

    let pipeline = DumpPipeline::new(config);
    let result = pipeline.run();
    pipeline.metrics().log_summary();

    match result {
        Ok(outcome) => {
            tracing::info!(
                "{} gender swap pairs ({} male only, {} female only), reports: {}",
                outcome.matched_pairs,
                outcome.male_only,
                outcome.female_only,
                outcome.reports_written.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Dump failed: {}", e);
            Err(e.into())
        }
    }
}
