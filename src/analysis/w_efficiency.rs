//! W boson forward muon efficiency task.
//!
//! Two passes per event, each behind its own switch:
//! - reco: hardest-process truth muons behind reconstructed tracks, (pt, eta)
//! - sim: hardest-process muons at generator level, (pt, eta) inside the
//!   forward region plus an inclusive pt spectrum

use super::{resolve_tracks, AnalysisTask, TaskStats};
use crate::aggregator::HistogramRegistry;
use crate::parser::schema::{Event, McParticle, Track};
use crate::truth::classifier::{
    in_forward_window_strict, is_diagnostic_hard_process, is_hard_process, is_muon,
};
use crate::truth::ParticleStore;
use crate::utils::config::{
    WEfficiencyConfig, EVENT_COUNTER_FILL, H_EVENT_COUNTER_RECO, H_EVENT_COUNTER_SIM, H_PT_TRUTH,
    H_Y_PT, H_Y_PT_TRUTH,
};
use crate::utils::error::{AggregateError, TaskError};
use log::info;

pub struct WEfficiencyTask {
    histos: HistogramRegistry,
    process_reco: bool,
    process_sim: bool,
    stats: TaskStats,
}

fn collision_label(particle: &McParticle) -> String {
    particle
        .mc_collision_id
        .map_or("-1".to_string(), |id| id.to_string())
}

impl WEfficiencyTask {
    pub fn new(config: &WEfficiencyConfig) -> Result<Self, AggregateError> {
        let mut histos = HistogramRegistry::new();
        histos.add_1d(H_EVENT_COUNTER_RECO, config.counter_axis.clone())?;
        histos.add_1d(H_EVENT_COUNTER_SIM, config.counter_axis.clone())?;
        histos.add_2d(H_Y_PT, config.pt_axis.clone(), config.eta_axis.clone())?;
        histos.add_2d(H_Y_PT_TRUTH, config.pt_axis.clone(), config.eta_axis.clone())?;
        histos.add_1d(H_PT_TRUTH, config.pt_axis.clone())?;

        Ok(Self {
            histos,
            process_reco: config.process_reco,
            process_sim: config.process_sim,
            stats: TaskStats::default(),
        })
    }

    pub fn into_histograms(self) -> HistogramRegistry {
        self.histos
    }

    fn process_reco(
        &mut self,
        event: &Event,
        resolved: &[(&Track, &McParticle)],
    ) -> Result<(), AggregateError> {
        self.histos.fill_1d(H_EVENT_COUNTER_RECO, EVENT_COUNTER_FILL)?;
        self.stats.tracks_seen += event.tracks.len() as u64;

        for &(_, particle) in resolved {
            if !is_muon(particle) {
                continue;
            }
            self.stats.muon_tracks += 1;

            if is_hard_process(particle) {
                self.histos.fill_2d(H_Y_PT, particle.pt, particle.eta)?;
                info!(
                    "Properties of reco W muon: pt {}; eta {}; collision {}",
                    particle.pt,
                    particle.eta,
                    collision_label(particle)
                );
            }
        }
        Ok(())
    }

    fn process_sim(&mut self, store: &ParticleStore<'_>) -> Result<(), AggregateError> {
        self.histos.fill_1d(H_EVENT_COUNTER_SIM, EVENT_COUNTER_FILL)?;

        for particle in store.iter() {
            if is_diagnostic_hard_process(particle) {
                info!(
                    "Hardest process particle has pdg code {}, from collision {}",
                    particle.pdg_code,
                    collision_label(particle)
                );
            }

            if is_muon(particle) && is_hard_process(particle) {
                if in_forward_window_strict(particle.eta) {
                    self.histos.fill_2d(H_Y_PT_TRUTH, particle.pt, particle.eta)?;
                }
                self.histos.fill_1d(H_PT_TRUTH, particle.pt)?;
            }
        }
        Ok(())
    }
}

impl AnalysisTask for WEfficiencyTask {
    fn name(&self) -> &'static str {
        "w-efficiency"
    }

    fn process(&mut self, event: &Event) -> Result<(), TaskError> {
        let store = ParticleStore::build(event)?;
        let resolved = if self.process_reco {
            resolve_tracks(event, &store)?
        } else {
            Vec::new()
        };

        if self.process_reco {
            self.process_reco(event, &resolved)?;
        }
        if self.process_sim {
            self.process_sim(&store)?;
        }
        self.stats.events_processed += 1;

        Ok(())
    }

    fn histograms(&self) -> &HistogramRegistry {
        &self.histos
    }

    fn stats(&self) -> TaskStats {
        self.stats
    }
}
