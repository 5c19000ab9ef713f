//! Event input model and decoding.
//!
//! This module handles:
//! - The static Event / Track / McParticle data model
//! - Decoding JSON-lines event streams with per-line error isolation

pub mod events;
pub mod schema;

// Re-export main types
pub use events::{parse_event, parse_event_bytes, EventReader, EventResult};
pub use schema::{Event, McParticle, ParticleId, Track};
