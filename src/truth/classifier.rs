//! Parentage and production-mechanism classification of truth muons.
//!
//! Only the immediate (first) mother is inspected. All PDG comparisons use
//! the absolute code; the sign only separates particle from antiparticle.

use super::store::ParticleStore;
use crate::parser::schema::McParticle;
use crate::utils::config::{
    DIAGNOSTIC_STATUS_MAX, DIAGNOSTIC_STATUS_MIN, FORWARD_ETA_MAX, FORWARD_ETA_MIN,
    HARD_PROCESS_STATUS_MAX, HARD_PROCESS_STATUS_MIN, HEAVY_FLAVOR_PDG_MAX, HEAVY_FLAVOR_PDG_MIN,
    MUON_PDG, PROMPT_STATUS_MAX, PROMPT_STATUS_MIN,
};
use serde::Serialize;

/// Identity of the immediate parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParentInfo {
    /// Absolute PDG code of the parent
    pub pdg_code: u32,
    /// Signed generator status of the parent
    pub status_code: i32,
}

/// Classification of one truth muon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// `None` when the muon has no recorded mother
    pub parent: Option<ParentInfo>,
    /// Parent is a charmed hadron (prompt or not)
    pub is_heavy_flavor_parent: bool,
    /// Parent comes straight out of the hard-scattering decay chain
    pub is_prompt_lepton: bool,
    /// Muon lies inside the forward acceptance window
    pub in_forward_window: bool,
}

impl Classification {
    /// Parent PDG code as written to records, 0 without a parent
    pub fn mother_pdg(&self) -> u32 {
        self.parent.map_or(0, |p| p.pdg_code)
    }
}

pub fn is_muon(particle: &McParticle) -> bool {
    particle.abs_pdg() == MUON_PDG
}

/// Inclusive forward window `[-4.0, -2.5]`
pub fn in_forward_window(eta: f64) -> bool {
    (FORWARD_ETA_MIN..=FORWARD_ETA_MAX).contains(&eta)
}

/// Strict forward window `(-4.0, -2.5)`, used for generator-level acceptance
pub fn in_forward_window_strict(eta: f64) -> bool {
    eta > FORWARD_ETA_MIN && eta < FORWARD_ETA_MAX
}

pub fn is_heavy_flavor_pdg(pdg_code: i32) -> bool {
    is_heavy_flavor_abs(pdg_code.unsigned_abs())
}

fn is_heavy_flavor_abs(abs_pdg: u32) -> bool {
    (HEAVY_FLAVOR_PDG_MIN..=HEAVY_FLAVOR_PDG_MAX).contains(&abs_pdg)
}

pub fn is_prompt_status(status_code: i32) -> bool {
    (PROMPT_STATUS_MIN..=PROMPT_STATUS_MAX).contains(&status_code.unsigned_abs())
}

/// Particle's own status marks it as part of the hardest subprocess
pub fn is_hard_process(particle: &McParticle) -> bool {
    (HARD_PROCESS_STATUS_MIN..=HARD_PROCESS_STATUS_MAX).contains(&particle.status_code)
}

/// Broader hardest-process band, only used for logging
pub fn is_diagnostic_hard_process(particle: &McParticle) -> bool {
    (DIAGNOSTIC_STATUS_MIN..=DIAGNOSTIC_STATUS_MAX).contains(&particle.status_code)
}

/// Classify a resolved truth particle
///
/// **Public** - main entry point of the classifier
///
/// # Returns
/// `None` for anything that is not a muon; such particles must not reach
/// the aggregates or the record stream.
pub fn classify(particle: &McParticle, store: &ParticleStore<'_>) -> Option<Classification> {
    if !is_muon(particle) {
        return None;
    }

    let parent = store.first_mother(particle).map(|mother| ParentInfo {
        pdg_code: mother.abs_pdg(),
        status_code: mother.status_code,
    });

    Some(Classification {
        parent,
        is_heavy_flavor_parent: parent.is_some_and(|p| is_heavy_flavor_abs(p.pdg_code)),
        is_prompt_lepton: parent.is_some_and(|p| is_prompt_status(p.status_code)),
        in_forward_window: in_forward_window(particle.eta),
    })
}
