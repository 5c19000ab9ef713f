//! Run-scoped aggregation state.
//!
//! This module holds:
//! - Fixed-binning 1D / 2D histograms with edge-bin clipping
//! - The named histogram registry the tasks fill
//! - The deduplication set gating record emission

pub mod dedup;
pub mod histogram;
pub mod registry;

// Re-export main types
pub use dedup::DeduplicationSet;
pub use histogram::{AxisSpec, Flow, Histogram1D, Histogram2D, MAX_BINS};
pub use registry::{Histogram, HistogramRegistry};
