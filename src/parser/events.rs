//! JSON-lines event reader.
//!
//! One event per line. Lines are read as raw bytes, so a line that is not
//! valid UTF-8 or not a valid event is reported as an [`EventError`] for that
//! line only and the reader keeps going with the next one. Only I/O errors
//! end the stream.

use super::schema::Event;
use crate::utils::error::{EventError, EventErrorKind};
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Result of reading one input line
pub type EventResult = Result<Event, EventError>;

/// Iterator over the events of a JSON-lines stream
pub struct EventReader<R> {
    lines: io::Split<R>,
    line_no: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
        }
    }
}

impl EventReader<BufReader<File>> {
    /// Open a JSON-lines file
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        debug!("Opening event stream: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = io::Result<EventResult>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return Some(Ok(parse_event_bytes(&line).map_err(|e| e.at_line(self.line_no))));
        }
    }
}

/// Decode a single event from one JSON line
///
/// On failure, the event id is recovered from the raw JSON when possible so
/// the error can still be tied to the event.
pub fn parse_event(line: &str) -> EventResult {
    parse_event_bytes(line.as_bytes())
}

/// Decode a single event from one raw input line
///
/// Invalid UTF-8 is a decode error like any other. The id lookup on failure
/// runs over a lossy copy so it still works for such lines.
pub fn parse_event_bytes(line: &[u8]) -> EventResult {
    serde_json::from_slice::<Event>(line).map_err(|e| {
        let event_id = serde_json::from_str::<serde_json::Value>(&String::from_utf8_lossy(line))
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_u64()));
        EventError::new(event_id, EventErrorKind::JsonError(e))
    })
}
