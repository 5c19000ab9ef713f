//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Why an event could not be processed
#[derive(Error, Debug)]
pub enum EventErrorKind {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Track {track_id} references unknown truth particle {particle_id}")]
    DanglingTruthLabel { track_id: i64, particle_id: i64 },

    #[error("Mother links starting at particle {0} form a cycle")]
    MotherCycle(i64),

    #[error("Particle id {0} appears more than once in the event")]
    DuplicateParticle(i64),
}

/// Malformed input, fatal for one event only
///
/// Carries the identity of the offending event (when it could be decoded)
/// and the input line it came from, so the run loop can report it and move on.
#[derive(Error, Debug)]
#[error("Event {} (line {}): {kind}", display_event_id(.event_id), display_line(.line))]
pub struct EventError {
    pub event_id: Option<u64>,
    pub line: Option<usize>,
    pub kind: EventErrorKind,
}

impl EventError {
    pub fn new(event_id: Option<u64>, kind: EventErrorKind) -> Self {
        Self {
            event_id,
            line: None,
            kind,
        }
    }

    /// Attach the input line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

fn display_event_id(event_id: &Option<u64>) -> String {
    event_id.map_or("<unknown>".to_string(), |id| id.to_string())
}

fn display_line(line: &Option<usize>) -> String {
    line.map_or("?".to_string(), |l| l.to_string())
}

/// Errors that can occur while declaring or filling histograms
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("Histogram already declared: {0}")]
    DuplicateHistogram(String),

    #[error("Unknown histogram: {0}")]
    UnknownHistogram(String),

    #[error("Histogram {name} is {actual}D, filled as {requested}D")]
    DimensionMismatch {
        name: String,
        actual: usize,
        requested: usize,
    },

    #[error("Invalid axis '{label}': {reason}")]
    InvalidAxis { label: String, reason: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors raised while an analysis task processes an event
///
/// Only `Event` is recoverable: the run loop logs it and moves on. The
/// others mean the run itself can no longer continue.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Failed to read events: {0}")]
    Input(#[from] std::io::Error),
}

/// Errors that can occur while loading the analysis configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
