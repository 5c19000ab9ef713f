use crate::analysis::AnalysisTask;
use crate::output::{read_summary, write_summary, RunSummary};
use crate::utils::config::{load_config, AnalysisConfig, RECORD_HEADER, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Load the TOML configuration, or the built-in defaults without one
pub fn resolve_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            info!("Loading analysis configuration: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))
        }
        None => {
            debug!("No configuration file given, using defaults");
            Ok(AnalysisConfig::default())
        }
    }
}

/// Check that the event input exists and is a file
pub fn validate_input(input: &Path) -> Result<()> {
    if input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(())
}

/// Print and/or persist the run summary
pub fn report_summary(
    summary: &RunSummary,
    print: bool,
    report: Option<&PathBuf>,
) -> Result<()> {
    if print {
        println!("\n{}", "=".repeat(60));
        println!("RUN SUMMARY");
        println!("{}", "=".repeat(60));
        print!("{}", summary.to_text());
        println!("{}", "=".repeat(60));
    }

    if let Some(path) = report {
        write_summary(summary, path).context("Failed to write run summary")?;
        info!("✓ Run summary written to: {}", path.display());
    }

    Ok(())
}

/// Log the final state of every histogram of a task
pub fn log_histograms(task: &dyn AnalysisTask) {
    for histogram in task.histograms().iter() {
        debug!(
            "Histogram {} ({}D): {} entries",
            histogram.name(),
            histogram.dimension(),
            histogram.entries()
        );
    }
}

/// Validate a run summary JSON file
pub fn validate_summary_file(file_path: PathBuf) -> Result<()> {
    println!("Validating run summary: {}", file_path.display());

    let summary = read_summary(&file_path)?;

    println!("✓ Valid run summary JSON");
    println!("  Version: {}", summary.version);
    println!("  Task: {}", summary.task);
    println!("  Events: {} processed, {} failed", summary.events_processed, summary.events_failed);
    println!("  Records: {}", summary.records_emitted);

    Ok(())
}

/// Display input and output format information
pub fn display_schema(show_details: bool) {
    println!("Muon Truth Studio formats");
    println!("Summary Schema Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Input (JSON lines, one event per line):");
        println!("  id: number                 - Event identifier");
        println!("  tracks: array              - Reconstructed forward tracks");
        println!("    id, eta, pt, p, phi      - Reconstructed kinematics");
        println!("    n_clusters: integer      - Attached clusters (alias nClusters)");
        println!("    p_dca, chi2              - Fit quality (alias pDca)");
        println!("    chi2_match_mch_mid/mft   - Matching chi2 (alias chi2MatchMCHMID/MFT)");
        println!("    mc_particle_id: number?  - Truth label (alias mcParticleId)");
        println!("  mc_particles: array        - Simulated particles (alias mcParticles)");
        println!("    id: number               - Global particle id");
        println!("    pdg_code, status_code    - Species and generator status");
        println!("    pt, eta                  - Truth kinematics");
        println!("    mother_id: number?       - First mother (alias motherId)");
        println!();
        println!("Track records (CSV):");
        println!("  {}", RECORD_HEADER);
    } else {
        println!("Use --show for detailed format information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Muon Truth Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Truth correlation and parentage classification for forward muon tracks.");
}
