//! W efficiency command implementation.

use crate::analysis::{process_stream, WEfficiencyTask};
use crate::commands::models::WEfficiencyArgs;
use crate::commands::utils::{log_histograms, report_summary, resolve_config, validate_input};
use crate::output::RunSummary;
use crate::parser::EventReader;
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the w-efficiency command
///
/// CLI switches can only turn passes off; they never re-enable a pass the
/// configuration file disabled.
pub fn execute_w_efficiency(args: WEfficiencyArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    info!("Starting W muon efficiency analysis: {}", args.input.display());

    let mut config = resolve_config(args.config.as_deref())?;
    let passes = &mut config.w_efficiency;
    passes.process_reco &= !args.no_reco;
    passes.process_sim &= !args.no_sim;

    if !passes.process_reco && !passes.process_sim {
        warn!("Both reco and sim passes are disabled, only events will be counted");
    }

    let reader = EventReader::open(&args.input)
        .with_context(|| format!("Failed to open events {}", args.input.display()))?;

    let mut task =
        WEfficiencyTask::new(&config.w_efficiency).context("Invalid histogram setup")?;

    let summary = process_stream(&mut task, reader).context("Event processing failed")?;
    log_histograms(&task);

    report_summary(&summary, args.print_summary, args.report.as_ref())?;

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(summary)
}

pub fn validate_args(args: &WEfficiencyArgs) -> Result<()> {
    validate_input(&args.input)
}
