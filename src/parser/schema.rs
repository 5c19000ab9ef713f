//! Input data model for collision events.
//!
//! These structs are the contract with whatever produces the events:
//! every field listed here must be populated. Framework column names are
//! accepted as aliases so exported tables can be fed in unchanged.

use serde::{Deserialize, Serialize};

/// Global identity of a simulated particle, unique within a run
pub type ParticleId = i64;

/// One collision: reconstructed tracks plus the simulated particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier
    pub id: u64,

    /// Reconstructed forward tracks
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Simulated particles with their mother links
    #[serde(default, alias = "mcParticles")]
    pub mc_particles: Vec<McParticle>,
}

/// A reconstructed forward track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub eta: f64,
    pub pt: f64,
    pub p: f64,
    pub phi: f64,

    /// Number of detector clusters attached to the track
    #[serde(alias = "nClusters")]
    pub n_clusters: i32,

    /// Momentum times distance of closest approach
    #[serde(alias = "pDca")]
    pub p_dca: f64,

    pub chi2: f64,

    /// Matching chi2 between the muon chambers and the muon identifier
    #[serde(alias = "chi2MatchMCHMID")]
    pub chi2_match_mch_mid: f64,

    /// Matching chi2 between the muon chambers and the forward tracker
    #[serde(alias = "chi2MatchMCHMFT")]
    pub chi2_match_mch_mft: f64,

    /// Truth label, absent when the track has no simulated counterpart
    #[serde(default, alias = "mcParticleId")]
    pub mc_particle_id: Option<ParticleId>,
}

/// A simulated (truth) particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McParticle {
    pub id: ParticleId,

    /// Signed PDG code, sign distinguishes antiparticles
    #[serde(alias = "pdgCode")]
    pub pdg_code: i32,

    /// Generator status code
    #[serde(alias = "statusCode")]
    pub status_code: i32,

    pub pt: f64,
    pub eta: f64,

    /// First mother, absent for primaries
    #[serde(default, alias = "motherId")]
    pub mother_id: Option<ParticleId>,

    #[serde(default, alias = "mcCollisionId")]
    pub mc_collision_id: Option<u64>,
}

impl McParticle {
    /// PDG code with the particle/antiparticle sign dropped
    ///
    /// Unsigned so that `i32::MIN` cannot overflow.
    pub fn abs_pdg(&self) -> u32 {
        self.pdg_code.unsigned_abs()
    }
}
