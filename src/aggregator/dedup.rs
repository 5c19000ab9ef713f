//! Run-scoped deduplication of truth-particle identities.
//!
//! Two reconstructed tracks can carry the same truth label (ambiguous
//! tracks). Aggregates count every track, but the record stream gets one
//! line per truth particle. The set lives as long as the task that owns it
//! and is never cleared; memory grows with the number of distinct truth
//! particles seen in the run.

use crate::parser::schema::ParticleId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct DeduplicationSet {
    seen: HashSet<ParticleId>,
}

impl DeduplicationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test and insert in one step
    ///
    /// Returns `true` exactly once per identity over the lifetime of the set.
    pub fn is_first_occurrence(&mut self, id: ParticleId) -> bool {
        self.seen.insert(id)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.seen.contains(&id)
    }

    /// Number of distinct identities recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
