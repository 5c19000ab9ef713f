//! Run summary report.
//!
//! Counts collected over a whole run, written as pretty JSON on request.
//! Histogram contents are not part of the report.

use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level summary written at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Which analysis produced the run
    pub task: String,

    pub events_processed: u64,

    /// Events rejected as malformed input
    pub events_failed: u64,

    pub tracks_seen: u64,

    /// Tracks whose truth particle is a muon
    pub muon_tracks: u64,

    pub records_emitted: u64,

    /// Histogram name and number of binned fills
    pub histogram_entries: Vec<(String, u64)>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

impl RunSummary {
    pub fn new(task: &str) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            task: task.to_string(),
            events_processed: 0,
            events_failed: 0,
            tracks_seen: 0,
            muon_tracks: 0,
            records_emitted: 0,
            histogram_entries: Vec::new(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Human-readable multi-line summary
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "Task:             {}\n\
             Events processed: {}\n\
             Events failed:    {}\n\
             Tracks seen:      {}\n\
             Muon tracks:      {}\n\
             Records emitted:  {}\n",
            self.task,
            self.events_processed,
            self.events_failed,
            self.tracks_seen,
            self.muon_tracks,
            self.records_emitted
        );
        for (name, entries) in &self.histogram_entries {
            text.push_str(&format!("  {:<18} {} entries\n", name, entries));
        }
        text
    }
}

/// Write the summary as pretty JSON
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(summary: &RunSummary, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing run summary to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a summary back from JSON
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<RunSummary, OutputError> {
    let file = File::open(input_path.as_ref()).map_err(OutputError::WriteFailed)?;
    let summary: RunSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;
    Ok(summary)
}
