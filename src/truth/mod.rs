//! Truth correlation: particle ancestry, track labels, classification.

pub mod classifier;
pub mod resolver;
pub mod store;

pub use classifier::{classify, Classification, ParentInfo};
pub use resolver::resolve;
pub use store::ParticleStore;
