//! Analysis tasks and the event loop that drives them.
//!
//! Each task owns its run-scoped state (histograms, and for the
//! heavy-flavour task the deduplication set and record sink). Events are
//! processed one at a time, in stream order.

pub mod hf_muon;
pub mod w_efficiency;

pub use hf_muon::HfMuonTask;
pub use w_efficiency::WEfficiencyTask;

use crate::aggregator::HistogramRegistry;
use crate::output::RunSummary;
use crate::parser::schema::{Event, McParticle, Track};
use crate::parser::EventResult;
use crate::truth::{resolve, ParticleStore};
use crate::utils::error::{EventError, TaskError};
use log::{debug, info, warn};
use std::io;

/// Counters every task keeps alongside its histograms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub events_processed: u64,
    pub tracks_seen: u64,
    pub muon_tracks: u64,
    pub records_emitted: u64,
}

/// A per-event analysis
pub trait AnalysisTask {
    /// Short task name used in logs and reports
    fn name(&self) -> &'static str;

    /// Process one event
    ///
    /// Malformed events are reported as `TaskError::Event` before any
    /// run-scoped state is touched.
    fn process(&mut self, event: &Event) -> Result<(), TaskError>;

    fn histograms(&self) -> &HistogramRegistry;

    fn stats(&self) -> TaskStats;
}

/// Resolve the truth particle of every track in an event
///
/// Unlabelled tracks are dropped. Any dangling label fails the whole event,
/// so callers can validate first and mutate afterwards.
pub(crate) fn resolve_tracks<'e>(
    event: &'e Event,
    store: &ParticleStore<'e>,
) -> Result<Vec<(&'e Track, &'e McParticle)>, EventError> {
    let mut resolved = Vec::with_capacity(event.tracks.len());
    for track in &event.tracks {
        match resolve(track, store).map_err(|kind| EventError::new(Some(event.id), kind))? {
            Some(particle) => resolved.push((track, particle)),
            None => debug!("Track {} in event {} has no truth label", track.id, event.id),
        }
    }
    Ok(resolved)
}

/// Feed a stream of decoded events through a task
///
/// **Public** - main event loop used by the commands
///
/// Malformed events are logged, counted and skipped. Read errors and
/// output failures stop the run.
pub fn process_stream<I>(task: &mut dyn AnalysisTask, events: I) -> Result<RunSummary, TaskError>
where
    I: IntoIterator<Item = io::Result<EventResult>>,
{
    let mut summary = RunSummary::new(task.name());

    for item in events {
        let decoded = item?;

        let outcome = match decoded {
            Ok(event) => task.process(&event),
            Err(e) => Err(TaskError::Event(e)),
        };

        match outcome {
            Ok(()) => {}
            Err(TaskError::Event(e)) => {
                warn!("Skipping malformed event: {}", e);
                summary.events_failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let stats = task.stats();
    summary.events_processed = stats.events_processed;
    summary.tracks_seen = stats.tracks_seen;
    summary.muon_tracks = stats.muon_tracks;
    summary.records_emitted = stats.records_emitted;
    summary.histogram_entries = task
        .histograms()
        .iter()
        .map(|h| (h.name().to_string(), h.entries()))
        .collect();

    info!(
        "{}: {} events processed, {} failed, {} records",
        task.name(),
        summary.events_processed,
        summary.events_failed,
        summary.records_emitted
    );

    Ok(summary)
}
