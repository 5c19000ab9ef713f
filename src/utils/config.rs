//! Configuration and constants for the analysis.
//!
//! The classification bands below are generator conventions and are not
//! configurable. Histogram axes and the process switches can be
//! overridden from a TOML file via [`load_config`].

use super::error::ConfigError;
use crate::aggregator::AxisSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current run summary schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Absolute PDG code of the muon
pub const MUON_PDG: u32 = 13;

// Charmed hadron family (|PDG|), D mesons and friends
pub const HEAVY_FLAVOR_PDG_MIN: u32 = 411;
pub const HEAVY_FLAVOR_PDG_MAX: u32 = 435;

// Parent |status| band marking a prompt lepton
pub const PROMPT_STATUS_MIN: u32 = 81;
pub const PROMPT_STATUS_MAX: u32 = 89;

// Own status band of hardest-subprocess particles
pub const HARD_PROCESS_STATUS_MIN: i32 = 21;
pub const HARD_PROCESS_STATUS_MAX: i32 = 34;

// Broader band used only for diagnostic logging in the sim pass
pub const DIAGNOSTIC_STATUS_MIN: i32 = 11;
pub const DIAGNOSTIC_STATUS_MAX: i32 = 34;

/// Forward muon spectrometer acceptance in pseudorapidity
pub const FORWARD_ETA_MIN: f64 = -4.0;
pub const FORWARD_ETA_MAX: f64 = -2.5;

/// Value every event counter is filled with
pub const EVENT_COUNTER_FILL: f64 = 0.5;

/// Header line of the per-track record stream
pub const RECORD_HEADER: &str =
    "ID,eta,pt,p,phi,motherPDG,nClusters,pDca,chi2,chi2MatchMCHMID,chi2MatchMCHMFT,isPrompt";

// Histogram names
pub const H_EVENT_COUNTER_RECO: &str = "eventCounterReco";
pub const H_EVENT_COUNTER_SIM: &str = "eventCounterSim";
pub const H_MU_PT_RECO: &str = "muPtHistReco";
pub const H_MU_PT_RECO_D: &str = "muPtHistRecoD";
pub const H_Y_PT: &str = "yPtHist";
pub const H_Y_PT_TRUTH: &str = "yPtTruthHist";
pub const H_PT_TRUTH: &str = "PtTruthHist";

/// Analysis configuration, loaded from TOML
///
/// Every field defaults to the value the analysis was tuned with, so an
/// empty file (or no file) reproduces the standard binning.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Heavy-flavour task settings
    pub hf: HfConfig,

    /// W efficiency task settings
    pub w_efficiency: WEfficiencyConfig,
}

/// Axes of the heavy-flavour muon task
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HfConfig {
    pub counter_axis: AxisSpec,
    pub pt_axis: AxisSpec,
}

/// Axes and process switches of the W efficiency task
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WEfficiencyConfig {
    pub counter_axis: AxisSpec,
    pub pt_axis: AxisSpec,
    pub eta_axis: AxisSpec,
    /// Run the reconstructed-track pass
    pub process_reco: bool,
    /// Run the generator-level pass
    pub process_sim: bool,
}

impl Default for HfConfig {
    fn default() -> Self {
        Self {
            counter_axis: counter_axis(),
            pt_axis: AxisSpec::new(10, 0.0, 20.0, "p_{T} (GeV/c)"),
        }
    }
}

impl Default for WEfficiencyConfig {
    fn default() -> Self {
        Self {
            counter_axis: counter_axis(),
            pt_axis: AxisSpec::new(15, 0.0, 80.0, "p_{T} (GeV/c)"),
            eta_axis: AxisSpec::new(10, FORWARD_ETA_MIN, FORWARD_ETA_MAX, "#eta"),
            process_reco: true,
            process_sim: true,
        }
    }
}

fn counter_axis() -> AxisSpec {
    AxisSpec::new(1, 0.0, 1.0, "")
}

impl AnalysisConfig {
    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axes = [
            &self.hf.counter_axis,
            &self.hf.pt_axis,
            &self.w_efficiency.counter_axis,
            &self.w_efficiency.pt_axis,
            &self.w_efficiency.eta_axis,
        ];
        for axis in axes {
            axis.validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        Ok(())
    }
}

/// Load the analysis configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
///
/// # Example
/// ```ignore
/// let config = load_config("analysis.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: AnalysisConfig = toml::from_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.hf.pt_axis.bins, 10);
        assert_eq!(config.w_efficiency.pt_axis.upper, 80.0);
    }

    #[test]
    fn test_partial_override() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            [hf.pt_axis]
            bins = 40
            lower = 0.0
            upper = 40.0

            [w_efficiency]
            process_sim = false
            "#,
        )
        .unwrap();

        assert_eq!(config.hf.pt_axis.bins, 40);
        assert_eq!(config.hf.pt_axis.label, "");
        assert!(config.w_efficiency.process_reco);
        assert!(!config.w_efficiency.process_sim);
    }

    #[test]
    fn test_validate_rejects_zero_bins() {
        let mut config = AnalysisConfig::default();
        config.w_efficiency.eta_axis = AxisSpec::new(0, -4.0, -2.5, "#eta");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_oversized_axis() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("analysis.toml");
        fs::write(
            &path,
            "[w_efficiency.pt_axis]\nbins = 4294967296\nlower = 0.0\nupper = 80.0\n",
        )
        .unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_axis() {
        let mut config = AnalysisConfig::default();
        config.hf.pt_axis = AxisSpec::new(10, 20.0, 0.0, "pt");
        assert!(config.validate().is_err());
    }
}
