//! Heavy-flavour forward muon task.
//!
//! For every reconstructed track with a truth muon behind it:
//! 1. Fill the forward-region pt histogram (truth eta in the window)
//! 2. Fill the charm-parent pt histogram
//! 3. Emit one record per distinct truth muon (ambiguous tracks collapse)

use super::{resolve_tracks, AnalysisTask, TaskStats};
use crate::aggregator::{DeduplicationSet, HistogramRegistry};
use crate::output::RecordEmitter;
use crate::parser::schema::Event;
use crate::truth::{classify, ParticleStore};
use crate::utils::config::{
    HfConfig, EVENT_COUNTER_FILL, H_EVENT_COUNTER_RECO, H_MU_PT_RECO, H_MU_PT_RECO_D,
};
use crate::utils::error::{AggregateError, OutputError, TaskError};
use log::debug;
use std::io::Write;

pub struct HfMuonTask<W: Write> {
    histos: HistogramRegistry,
    selected: DeduplicationSet,
    emitter: RecordEmitter<W>,
    stats: TaskStats,
}

impl<W: Write> HfMuonTask<W> {
    /// Declare the histograms and take ownership of the record sink
    pub fn new(config: &HfConfig, emitter: RecordEmitter<W>) -> Result<Self, AggregateError> {
        let mut histos = HistogramRegistry::new();
        histos.add_1d(H_EVENT_COUNTER_RECO, config.counter_axis.clone())?;
        histos.add_1d(H_MU_PT_RECO, config.pt_axis.clone())?;
        histos.add_1d(H_MU_PT_RECO_D, config.pt_axis.clone())?;

        Ok(Self {
            histos,
            selected: DeduplicationSet::new(),
            emitter,
            stats: TaskStats::default(),
        })
    }

    /// Truth identities already written to the record stream
    pub fn selected(&self) -> &DeduplicationSet {
        &self.selected
    }

    /// Flush the record sink and hand back the run's results
    pub fn finish(self) -> Result<(HistogramRegistry, W), OutputError> {
        let sink = self.emitter.finish()?;
        Ok((self.histos, sink))
    }
}

impl<W: Write> AnalysisTask for HfMuonTask<W> {
    fn name(&self) -> &'static str {
        "hf"
    }

    fn process(&mut self, event: &Event) -> Result<(), TaskError> {
        let store = ParticleStore::build(event)?;
        let resolved = resolve_tracks(event, &store)?;

        self.histos.fill_1d(H_EVENT_COUNTER_RECO, EVENT_COUNTER_FILL)?;
        self.stats.events_processed += 1;
        self.stats.tracks_seen += event.tracks.len() as u64;

        for (track, particle) in resolved {
            let Some(class) = classify(particle, &store) else {
                continue;
            };
            self.stats.muon_tracks += 1;

            if class.in_forward_window {
                self.histos.fill_1d(H_MU_PT_RECO, particle.pt)?;
            }

            if class.is_heavy_flavor_parent {
                self.histos.fill_1d(H_MU_PT_RECO_D, particle.pt)?;
            }

            if self.selected.is_first_occurrence(particle.id) {
                self.emitter.emit(track, particle, &class)?;
                self.stats.records_emitted += 1;
            } else {
                debug!(
                    "Ambiguous track {} in event {}: truth muon {} already recorded",
                    track.id, event.id, particle.id
                );
            }
        }

        Ok(())
    }

    fn histograms(&self) -> &HistogramRegistry {
        &self.histos
    }

    fn stats(&self) -> TaskStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{McParticle, Track};

    fn track(id: i64, label: Option<i64>) -> Track {
        Track {
            id,
            eta: -3.0,
            pt: 5.0,
            p: 50.0,
            phi: 0.5,
            n_clusters: 10,
            p_dca: 0.2,
            chi2: 1.0,
            chi2_match_mch_mid: 1.0,
            chi2_match_mch_mft: 1.0,
            mc_particle_id: label,
        }
    }

    fn particle(id: i64, pdg: i32, status: i32, mother: Option<i64>) -> McParticle {
        McParticle {
            id,
            pdg_code: pdg,
            status_code: status,
            pt: 5.0,
            eta: -3.0,
            mother_id: mother,
            mc_collision_id: None,
        }
    }

    fn task() -> HfMuonTask<Vec<u8>> {
        let emitter = RecordEmitter::new(Vec::new()).unwrap();
        HfMuonTask::new(&HfConfig::default(), emitter).unwrap()
    }

    #[test]
    fn test_unlabelled_and_non_muon_tracks_skipped() {
        let mut task = task();
        let event = Event {
            id: 1,
            tracks: vec![track(1, None), track(2, Some(7))],
            mc_particles: vec![particle(7, 211, 91, None)],
        };

        task.process(&event).unwrap();

        assert_eq!(task.stats().muon_tracks, 0);
        assert_eq!(task.histograms().get_1d(H_MU_PT_RECO).unwrap().entries, 0);
        assert_eq!(task.histograms().get_1d(H_EVENT_COUNTER_RECO).unwrap().bin(0), 1);
        assert!(task.selected().is_empty());
    }

    #[test]
    fn test_malformed_event_leaves_state_untouched() {
        let mut task = task();
        let event = Event {
            id: 2,
            tracks: vec![track(1, Some(42)), track(2, Some(99))],
            mc_particles: vec![particle(42, 13, 91, None)],
        };

        let err = task.process(&event).unwrap_err();
        assert!(matches!(err, TaskError::Event(ref e) if e.event_id == Some(2)));
        assert_eq!(task.stats(), TaskStats::default());
        assert_eq!(task.histograms().get_1d(H_EVENT_COUNTER_RECO).unwrap().entries, 0);
        assert!(task.selected().is_empty());
    }
}
