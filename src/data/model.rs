use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};

// ---------------------------------------------------------------------------
// NamedSeries – one run's observations
// ---------------------------------------------------------------------------

/// An ordered sequence of observations keyed by its configuration name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    /// Configuration name (e.g. `"alr0.5"`), also the record file stem.
    pub name: String,
    /// One value per logged step. Order is the time axis.
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AlignParams – smoothing / rebasing knobs
// ---------------------------------------------------------------------------

/// Parameters of the smooth → rebase → truncate pipeline.
///
/// The defaults reproduce the search-sensitivity figure of the paper: a decay
/// of `0.86`, a 50-step baseline window and a baseline of `96.585` accuracy
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignParams {
    /// Exponential smoothing decay `γ`, in the open interval (0, 1).
    pub decay: f64,
    /// Number of leading samples averaged for the baseline. Clamped to the
    /// series length when the series is shorter.
    pub window: usize,
    /// Value the leading-window mean is shifted to.
    pub baseline: f64,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            decay: 0.86,
            window: 50,
            baseline: 96.585,
        }
    }
}

impl AlignParams {
    /// Reject parameters outside their domain before any computation.
    pub fn validate(&self) -> Result<()> {
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(FigureError::InvalidParameter(format!(
                "decay must lie in (0, 1), got {}",
                self.decay
            )));
        }
        if self.window == 0 {
            return Err(FigureError::InvalidParameter(
                "baseline window must be at least 1".to_string(),
            ));
        }
        if !self.baseline.is_finite() {
            return Err(FigureError::InvalidParameter(format!(
                "baseline must be finite, got {}",
                self.baseline
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AlignedSeriesSet – equal-length, rebased series
// ---------------------------------------------------------------------------

/// Smoothed, rebased series that all share the same length.
///
/// Only the aligner builds this type, so every member is guaranteed to have
/// exactly [`AlignedSeriesSet::len`] values.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeriesSet {
    series: Vec<NamedSeries>,
    len: usize,
}

impl AlignedSeriesSet {
    /// Truncate every series to the shortest one and wrap the result.
    pub(crate) fn from_truncated(mut series: Vec<NamedSeries>) -> Self {
        let len = series.iter().map(NamedSeries::len).min().unwrap_or(0);
        for s in &mut series {
            s.values.truncate(len);
        }
        Self { series, len }
    }

    /// Common length `L` of every member.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in the order they were supplied.
    pub fn series(&self) -> &[NamedSeries] {
        &self.series
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&NamedSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// `(index, value)` pairs over the shared axis `0..L`.
    pub fn points(&self, name: &str) -> Option<Vec<[f64; 2]>> {
        self.get(name).map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, v])
                .collect()
        })
    }
}
