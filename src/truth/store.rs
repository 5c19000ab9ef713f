//! Read-only view over one event's simulated-particle ancestry.
//!
//! Particles are indexed by their global id. Construction rejects duplicate
//! ids and mother cycles. A mother link naming a particle outside the event
//! is tolerated and reads as "no parent".

use crate::parser::schema::{Event, McParticle, ParticleId};
use crate::utils::error::{EventError, EventErrorKind};
use log::debug;
use std::collections::HashMap;

/// Indexed particle forest of a single event
#[derive(Debug)]
pub struct ParticleStore<'a> {
    particles: &'a [McParticle],
    index: HashMap<ParticleId, usize>,
}

/// Traversal state used by the cycle check
#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

impl<'a> ParticleStore<'a> {
    /// Build the store for an event
    ///
    /// # Errors
    /// * `DuplicateParticle` - Two particles share an id
    /// * `MotherCycle` - Following mother links loops back on itself
    pub fn build(event: &'a Event) -> Result<Self, EventError> {
        Self::from_particles(&event.mc_particles)
            .map_err(|kind| EventError::new(Some(event.id), kind))
    }

    /// Build the store from a bare particle slice
    pub fn from_particles(particles: &'a [McParticle]) -> Result<Self, EventErrorKind> {
        let mut index = HashMap::with_capacity(particles.len());
        for (i, particle) in particles.iter().enumerate() {
            if index.insert(particle.id, i).is_some() {
                return Err(EventErrorKind::DuplicateParticle(particle.id));
            }
        }

        let store = Self { particles, index };
        store.check_acyclic()?;

        debug!("Indexed {} simulated particles", particles.len());
        Ok(store)
    }

    /// Each particle has at most one first-mother edge, so a cycle shows up
    /// as a walk that revisits a node still on the current path.
    fn check_acyclic(&self) -> Result<(), EventErrorKind> {
        let mut state = vec![Visit::New; self.particles.len()];
        let mut path = Vec::new();

        for start in 0..self.particles.len() {
            let mut current = Some(start);
            while let Some(i) = current {
                match state[i] {
                    Visit::Done => break,
                    Visit::OnPath => {
                        return Err(EventErrorKind::MotherCycle(self.particles[i].id))
                    }
                    Visit::New => {}
                }
                state[i] = Visit::OnPath;
                path.push(i);
                current = self.mother_index(i);
            }
            for i in path.drain(..) {
                state[i] = Visit::Done;
            }
        }
        Ok(())
    }

    fn mother_index(&self, i: usize) -> Option<usize> {
        self.particles[i]
            .mother_id
            .and_then(|id| self.index.get(&id).copied())
    }

    /// Look up a particle by global id
    pub fn get(&self, id: ParticleId) -> Option<&'a McParticle> {
        self.index.get(&id).map(|&i| &self.particles[i])
    }

    /// Immediate (first) mother of a particle
    ///
    /// `None` for primaries and for links that point outside the event.
    pub fn first_mother(&self, particle: &McParticle) -> Option<&'a McParticle> {
        let mother_id = particle.mother_id?;
        let mother = self.get(mother_id);
        if mother.is_none() {
            debug!(
                "Mother {} of particle {} is not in the event, treating as no parent",
                mother_id, particle.id
            );
        }
        mother
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles in event order
    pub fn iter(&self) -> impl Iterator<Item = &'a McParticle> + 'a {
        self.particles.iter()
    }
}
