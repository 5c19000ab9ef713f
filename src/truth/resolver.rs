//! Track to truth-particle lookup.
//!
//! Tracks arrive with at most one truth label already attached; this only
//! follows that label into the event's particle store.

use super::store::ParticleStore;
use crate::parser::schema::{McParticle, Track};
use crate::utils::error::EventErrorKind;

/// Resolve the truth particle a track is labelled with
///
/// Returns `Ok(None)` for an unlabelled track (not an error: the caller
/// skips it). A label pointing outside the event is malformed input.
pub fn resolve<'a>(
    track: &Track,
    store: &ParticleStore<'a>,
) -> Result<Option<&'a McParticle>, EventErrorKind> {
    let Some(particle_id) = track.mc_particle_id else {
        return Ok(None);
    };

    store
        .get(particle_id)
        .map(Some)
        .ok_or(EventErrorKind::DanglingTruthLabel {
            track_id: track.id,
            particle_id,
        })
}
