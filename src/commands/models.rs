use std::path::PathBuf;

/// Arguments for the heavy-flavour command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct HfArgs {
    /// JSON-lines event file
    pub input: PathBuf,

    /// Track record output (CSV text)
    pub output_records: PathBuf,

    /// Optional TOML analysis configuration
    pub config: Option<PathBuf>,

    /// Optional JSON run summary
    pub report: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for HfArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_records: PathBuf::from("muontracks.txt"),
            config: None,
            report: None,
            print_summary: false,
        }
    }
}

/// Arguments for the W efficiency command
#[derive(Debug, Clone, Default)]
pub struct WEfficiencyArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub print_summary: bool,

    /// Skip the reconstructed-track pass
    pub no_reco: bool,

    /// Skip the generator-level pass
    pub no_sim: bool,
}
