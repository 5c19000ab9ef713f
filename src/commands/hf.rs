//! Heavy-flavour command implementation.
//!
//! The hf command:
//! 1. Loads the analysis configuration
//! 2. Opens the event stream and the record file
//! 3. Runs every event through the heavy-flavour task
//! 4. Flushes the records and reports the run summary

use crate::analysis::{process_stream, HfMuonTask};
use crate::commands::models::HfArgs;
use crate::commands::utils::{log_histograms, report_summary, resolve_config, validate_input};
use crate::output::{create_record_file, RunSummary};
use crate::parser::EventReader;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the hf command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Configuration load failures
/// * Input open/read failures
/// * Record file write errors
///
/// Malformed events are not errors: they are skipped and counted.
pub fn execute_hf(args: HfArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    info!("Starting heavy-flavour muon analysis: {}", args.input.display());

    let config = resolve_config(args.config.as_deref())?;

    let reader = EventReader::open(&args.input)
        .with_context(|| format!("Failed to open events {}", args.input.display()))?;

    let emitter =
        create_record_file(&args.output_records).context("Failed to create record file")?;

    let mut task = HfMuonTask::new(&config.hf, emitter).context("Invalid histogram setup")?;

    let summary = process_stream(&mut task, reader).context("Event processing failed")?;
    log_histograms(&task);

    task.finish().context("Failed to flush track records")?;
    info!("✓ Track records written to: {}", args.output_records.display());

    report_summary(&summary, args.print_summary, args.report.as_ref())?;

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(summary)
}

/// Validate hf arguments
///
/// **Public** - can be called before execute_hf for early validation
pub fn validate_args(args: &HfArgs) -> Result<()> {
    validate_input(&args.input)?;

    if args.output_records.as_os_str().is_empty() {
        anyhow::bail!("Record output path cannot be empty");
    }

    if args.output_records == args.input {
        anyhow::bail!("Record output would overwrite the input file");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_missing_input() {
        let args = HfArgs {
            input: PathBuf::from("/definitely/not/here.jsonl"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_input() {
        assert!(validate_args(&HfArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_output_overwrites_input() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let args = HfArgs {
            input: input.path().to_path_buf(),
            output_records: input.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_valid() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let args = HfArgs {
            input: input.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }
}
