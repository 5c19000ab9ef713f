//! Muon Truth Studio CLI
//!
//! Runs the forward muon truth analyses over JSON-lines event files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use muon_truth_studio::commands::{
    display_schema, display_version, execute_hf, execute_w_efficiency, hf, validate_summary_file,
    w_efficiency, HfArgs, WEfficiencyArgs,
};

/// Muon Truth Studio - truth correlation for forward muon tracks
#[derive(Parser, Debug)]
#[command(name = "muon-truth")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Heavy-flavour parentage of truth-matched muon tracks
    Hf {
        /// JSON-lines event file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for track records (placed in artifacts/ by default)
        #[arg(short, long, default_value = "artifacts/muontracks.txt")]
        output: PathBuf,

        /// TOML analysis configuration
        #[arg(short, long, env = "MUON_TRUTH_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for a JSON run summary
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// W boson forward muon efficiency (reco and generator level)
    WEfficiency {
        /// JSON-lines event file
        #[arg(short, long)]
        input: PathBuf,

        /// TOML analysis configuration
        #[arg(short, long, env = "MUON_TRUTH_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for a JSON run summary
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Skip the reconstructed-track pass
        #[arg(long)]
        no_reco: bool,

        /// Skip the generator-level pass
        #[arg(long)]
        no_sim: bool,
    },

    /// Validate a run summary JSON file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display input and record format information
    Schema {
        /// Show full format details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Hf {
            input,
            mut output,
            config,
            report,
            summary,
        } => {
            // Ensure records go to artifacts/ if no directory is specified
            if output.parent().map(|p| p.as_os_str().is_empty()).unwrap_or(true) {
                output = PathBuf::from("artifacts").join(output);
            }

            let args = HfArgs {
                input,
                output_records: output,
                config,
                report,
                print_summary: summary,
            };

            hf::validate_args(&args)?;
            execute_hf(args)?;
        }

        Commands::WEfficiency {
            input,
            config,
            report,
            summary,
            no_reco,
            no_sim,
        } => {
            let args = WEfficiencyArgs {
                input,
                config,
                report,
                print_summary: summary,
                no_reco,
                no_sim,
            };

            w_efficiency::validate_args(&args)?;
            execute_w_efficiency(args)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
