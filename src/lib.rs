//! Muon Truth Studio library
//!
//! Correlates reconstructed forward muon tracks with their simulated truth
//! particles, classifies them by parentage and production mechanism,
//! deduplicates ambiguous tracks, and aggregates the results into
//! histograms and a per-track record stream.
//!
//! This exposes the internal modules for the CLI and for testing.

pub mod aggregator;
pub mod analysis;
pub mod commands;
pub mod output;
pub mod parser;
pub mod truth;
pub mod utils;
