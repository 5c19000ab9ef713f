//! Fixed-binning 1D and 2D counting histograms.
//!
//! Binning is uniform between `lower` and `upper`. Values outside the range
//! are clipped into the first or last bin and also tallied as under/overflow,
//! so nothing is dropped. NaN cannot be binned and is only counted.

use crate::utils::error::AggregateError;
use serde::{Deserialize, Serialize};

/// Upper bound on the bins of one axis and on the cells of a 2D histogram
pub const MAX_BINS: usize = 1 << 20;

/// Declaration of one histogram axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Number of bins
    pub bins: usize,

    /// Lower edge of the first bin
    pub lower: f64,

    /// Upper edge of the last bin
    pub upper: f64,

    /// Axis title
    #[serde(default)]
    pub label: String,
}

/// Where a value landed relative to the axis range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    InRange,
    Underflow,
    Overflow,
}

impl AxisSpec {
    pub fn new(bins: usize, lower: f64, upper: f64, label: impl Into<String>) -> Self {
        Self {
            bins,
            lower,
            upper,
            label: label.into(),
        }
    }

    /// Reject axes that cannot hold a single bin
    pub fn validate(&self) -> Result<(), AggregateError> {
        let reason = if self.bins == 0 {
            Some("bin count must be greater than 0".to_string())
        } else if self.bins > MAX_BINS {
            Some(format!("bin count {} exceeds the limit of {}", self.bins, MAX_BINS))
        } else if !self.lower.is_finite() || !self.upper.is_finite() {
            Some("bounds must be finite".to_string())
        } else if self.lower >= self.upper {
            Some(format!(
                "lower bound {} must be below upper bound {}",
                self.lower, self.upper
            ))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(AggregateError::InvalidAxis {
                label: self.label.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.bins as f64
    }

    /// Bin index for a value, clipped into `[0, bins)`
    ///
    /// Returns `None` for NaN.
    pub fn locate(&self, value: f64) -> Option<(usize, Flow)> {
        if value.is_nan() {
            return None;
        }
        if value < self.lower {
            return Some((0, Flow::Underflow));
        }
        if value >= self.upper {
            return Some((self.bins - 1, Flow::Overflow));
        }

        let index = ((value - self.lower) / self.bin_width()).floor() as usize;
        // Rounding can push values just below `upper` one past the end
        Some((index.min(self.bins - 1), Flow::InRange))
    }

    /// Lower edge of a bin
    pub fn bin_low_edge(&self, index: usize) -> f64 {
        self.lower + index as f64 * self.bin_width()
    }
}

/// One-dimensional counting histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram1D {
    pub name: String,
    pub axis: AxisSpec,
    /// Bin contents, length = `axis.bins`
    pub contents: Vec<u64>,
    /// Fills below the range (already folded into the first bin)
    pub underflow: u64,
    /// Fills at or above the range (already folded into the last bin)
    pub overflow: u64,
    /// Fills with a NaN value, not binned
    pub nan_entries: u64,
    /// Binned fills
    pub entries: u64,
}

impl Histogram1D {
    pub fn new(name: impl Into<String>, axis: AxisSpec) -> Result<Self, AggregateError> {
        axis.validate()?;
        Ok(Self {
            name: name.into(),
            contents: vec![0; axis.bins],
            axis,
            underflow: 0,
            overflow: 0,
            nan_entries: 0,
            entries: 0,
        })
    }

    pub fn fill(&mut self, value: f64) {
        let Some((index, flow)) = self.axis.locate(value) else {
            self.nan_entries += 1;
            return;
        };

        match flow {
            Flow::Underflow => self.underflow += 1,
            Flow::Overflow => self.overflow += 1,
            Flow::InRange => {}
        }
        self.contents[index] += 1;
        self.entries += 1;
    }

    pub fn bin(&self, index: usize) -> u64 {
        self.contents.get(index).copied().unwrap_or(0)
    }
}

/// Two-dimensional counting histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram2D {
    pub name: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// Row-major contents: `contents[iy * x_bins + ix]`
    pub contents: Vec<u64>,
    /// Fills where at least one coordinate was clipped
    pub clipped: u64,
    /// Fills with a NaN coordinate, not binned
    pub nan_entries: u64,
    pub entries: u64,
}

impl Histogram2D {
    pub fn new(
        name: impl Into<String>,
        x_axis: AxisSpec,
        y_axis: AxisSpec,
    ) -> Result<Self, AggregateError> {
        x_axis.validate()?;
        y_axis.validate()?;
        let cells = x_axis
            .bins
            .checked_mul(y_axis.bins)
            .filter(|&cells| cells <= MAX_BINS)
            .ok_or_else(|| AggregateError::InvalidAxis {
                label: format!("{} x {}", x_axis.label, y_axis.label),
                reason: format!(
                    "{} x {} bins exceeds the limit of {} cells",
                    x_axis.bins, y_axis.bins, MAX_BINS
                ),
            })?;

        Ok(Self {
            name: name.into(),
            contents: vec![0; cells],
            x_axis,
            y_axis,
            clipped: 0,
            nan_entries: 0,
            entries: 0,
        })
    }

    pub fn fill(&mut self, x: f64, y: f64) {
        let (Some((ix, fx)), Some((iy, fy))) = (self.x_axis.locate(x), self.y_axis.locate(y))
        else {
            self.nan_entries += 1;
            return;
        };

        if fx != Flow::InRange || fy != Flow::InRange {
            self.clipped += 1;
        }
        self.contents[iy * self.x_axis.bins + ix] += 1;
        self.entries += 1;
    }

    pub fn bin(&self, ix: usize, iy: usize) -> u64 {
        if ix >= self.x_axis.bins || iy >= self.y_axis.bins {
            return 0;
        }
        self.contents[iy * self.x_axis.bins + ix]
    }

    /// Project onto the x axis
    pub fn projection_x(&self) -> Vec<u64> {
        let mut projection = vec![0; self.x_axis.bins];
        for (i, count) in self.contents.iter().enumerate() {
            projection[i % self.x_axis.bins] += count;
        }
        projection
    }
}
