//! Named histogram registry.
//!
//! Histograms are declared once when a task starts and filled by name for
//! the rest of the run. Declaration order is preserved for reporting.

use super::histogram::{AxisSpec, Histogram1D, Histogram2D};
use crate::utils::error::AggregateError;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// A registered histogram of either dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Histogram {
    OneD(Histogram1D),
    TwoD(Histogram2D),
}

impl Histogram {
    pub fn name(&self) -> &str {
        match self {
            Histogram::OneD(h) => &h.name,
            Histogram::TwoD(h) => &h.name,
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            Histogram::OneD(_) => 1,
            Histogram::TwoD(_) => 2,
        }
    }

    /// Number of binned fills
    pub fn entries(&self) -> u64 {
        match self {
            Histogram::OneD(h) => h.entries,
            Histogram::TwoD(h) => h.entries,
        }
    }
}

/// Run-scoped collection of named histograms
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistogramRegistry {
    histograms: Vec<Histogram>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl HistogramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, histogram: Histogram) -> Result<(), AggregateError> {
        let name = histogram.name().to_string();
        if self.index.contains_key(&name) {
            return Err(AggregateError::DuplicateHistogram(name));
        }
        debug!("Declared {}D histogram '{}'", histogram.dimension(), name);
        self.index.insert(name, self.histograms.len());
        self.histograms.push(histogram);
        Ok(())
    }

    /// Declare a 1D histogram
    pub fn add_1d(&mut self, name: &str, axis: AxisSpec) -> Result<(), AggregateError> {
        self.insert(Histogram::OneD(Histogram1D::new(name, axis)?))
    }

    /// Declare a 2D histogram
    pub fn add_2d(
        &mut self,
        name: &str,
        x_axis: AxisSpec,
        y_axis: AxisSpec,
    ) -> Result<(), AggregateError> {
        self.insert(Histogram::TwoD(Histogram2D::new(name, x_axis, y_axis)?))
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut Histogram, AggregateError> {
        let &i = self
            .index
            .get(name)
            .ok_or_else(|| AggregateError::UnknownHistogram(name.to_string()))?;
        Ok(&mut self.histograms[i])
    }

    /// Increment a 1D histogram
    pub fn fill_1d(&mut self, name: &str, value: f64) -> Result<(), AggregateError> {
        match self.lookup_mut(name)? {
            Histogram::OneD(h) => {
                h.fill(value);
                Ok(())
            }
            Histogram::TwoD(_) => Err(AggregateError::DimensionMismatch {
                name: name.to_string(),
                actual: 2,
                requested: 1,
            }),
        }
    }

    /// Increment a 2D histogram
    pub fn fill_2d(&mut self, name: &str, x: f64, y: f64) -> Result<(), AggregateError> {
        match self.lookup_mut(name)? {
            Histogram::TwoD(h) => {
                h.fill(x, y);
                Ok(())
            }
            Histogram::OneD(_) => Err(AggregateError::DimensionMismatch {
                name: name.to_string(),
                actual: 1,
                requested: 2,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.index.get(name).map(|&i| &self.histograms[i])
    }

    pub fn get_1d(&self, name: &str) -> Option<&Histogram1D> {
        match self.get(name)? {
            Histogram::OneD(h) => Some(h),
            Histogram::TwoD(_) => None,
        }
    }

    pub fn get_2d(&self, name: &str) -> Option<&Histogram2D> {
        match self.get(name)? {
            Histogram::TwoD(h) => Some(h),
            Histogram::OneD(_) => None,
        }
    }

    /// Histograms in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Histogram> {
        self.histograms.iter()
    }

    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HistogramRegistry {
        let mut registry = HistogramRegistry::new();
        registry
            .add_1d("pt", AxisSpec::new(10, 0.0, 20.0, "pt"))
            .unwrap();
        registry
            .add_2d(
                "ptEta",
                AxisSpec::new(15, 0.0, 80.0, "pt"),
                AxisSpec::new(10, -4.0, -2.5, "eta"),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_fill_by_name() {
        let mut registry = registry();
        registry.fill_1d("pt", 3.0).unwrap();
        registry.fill_2d("ptEta", 3.0, -3.0).unwrap();

        assert_eq!(registry.get_1d("pt").unwrap().bin(1), 1);
        assert_eq!(registry.get("ptEta").unwrap().entries(), 1);
        let names: Vec<_> = registry.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["pt", "ptEta"]);
    }

    #[test]
    fn test_unknown_histogram() {
        let mut registry = registry();
        assert_eq!(
            registry.fill_1d("nope", 1.0),
            Err(AggregateError::UnknownHistogram("nope".to_string()))
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut registry = registry();
        assert!(matches!(
            registry.fill_2d("pt", 1.0, 1.0),
            Err(AggregateError::DimensionMismatch { actual: 1, requested: 2, .. })
        ));
        assert!(matches!(
            registry.fill_1d("ptEta", 1.0),
            Err(AggregateError::DimensionMismatch { actual: 2, requested: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut registry = registry();
        let err = registry
            .add_1d("pt", AxisSpec::new(5, 0.0, 1.0, ""))
            .unwrap_err();
        assert_eq!(err, AggregateError::DuplicateHistogram("pt".to_string()));
        assert_eq!(registry.len(), 2);
    }
}
