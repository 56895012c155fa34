use super::loader::SeriesSource;
use super::model::{AlignParams, AlignedSeriesSet, NamedSeries};
use crate::error::{FigureError, Result};

// ---------------------------------------------------------------------------
// Per-series steps
// ---------------------------------------------------------------------------

/// Causal exponential smoothing: `s[0] = raw[0]`,
/// `s[i] = s[i-1]·decay + raw[i]·(1-decay)`.
///
/// An empty input yields an empty output.
pub fn exponential_smooth(raw: &[f64], decay: f64) -> Vec<f64> {
    let Some((&first, rest)) = raw.split_first() else {
        return Vec::new();
    };

    let mut smoothed = Vec::with_capacity(raw.len());
    let mut level = first;
    smoothed.push(level);
    for &v in rest {
        level = level * decay + v * (1.0 - decay);
        smoothed.push(level);
    }
    smoothed
}

/// Shift `series` so that the mean of its first `window` values equals
/// `baseline`. The window is clamped to the series length.
pub fn rebase(series: &NamedSeries, window: usize, baseline: f64) -> Result<NamedSeries> {
    if series.is_empty() {
        return Err(FigureError::EmptyInput {
            name: series.name.clone(),
        });
    }

    let w = window.clamp(1, series.len());
    let head_mean = series.values[..w].iter().sum::<f64>() / w as f64;
    let offset = baseline - head_mean;

    Ok(NamedSeries::new(
        series.name.clone(),
        series.values.iter().map(|v| v + offset).collect(),
    ))
}

/// Cut every series down to the shortest member (prefixes are kept intact).
pub fn truncate_to_shortest(series: Vec<NamedSeries>) -> AlignedSeriesSet {
    AlignedSeriesSet::from_truncated(series)
}

// ---------------------------------------------------------------------------
// Whole-set pipeline
// ---------------------------------------------------------------------------

/// Smooth, rebase and truncate a set of raw series.
///
/// Parameters are checked before anything is computed, and every series must
/// carry at least one observation.
pub fn align_series(inputs: Vec<NamedSeries>, params: &AlignParams) -> Result<AlignedSeriesSet> {
    params.validate()?;

    if let Some(empty) = inputs.iter().find(|s| s.is_empty()) {
        return Err(FigureError::EmptyInput {
            name: empty.name.clone(),
        });
    }

    let mut rebased = Vec::with_capacity(inputs.len());
    for raw in inputs {
        let smoothed = exponential_smooth(&raw.values, params.decay);
        let smoothed = NamedSeries::new(raw.name, smoothed);
        log::debug!("len({}) == {}", smoothed.name, smoothed.len());
        rebased.push(rebase(&smoothed, params.window, params.baseline)?);
    }

    let aligned = truncate_to_shortest(rebased);
    log::info!(
        "Aligned {} series to a common length of {}",
        aligned.series().len(),
        aligned.len()
    );
    Ok(aligned)
}

/// Load every name from `source`, then align them.
///
/// Loading is all-or-nothing: the first unresolvable record aborts the run.
pub fn align_from_source<S, N>(
    source: &S,
    names: &[N],
    params: &AlignParams,
) -> Result<AlignedSeriesSet>
where
    S: SeriesSource + ?Sized,
    N: AsRef<str>,
{
    params.validate()?;

    let inputs = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            source
                .load(name)
                .map(|values| NamedSeries::new(name, values))
        })
        .collect::<Result<Vec<_>>>()?;

    align_series(inputs, params)
}
