use crate::error::{FigureError, Result};

/// A scatter group split into its best point and everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScatter {
    /// Remaining points, ascending in `y`.
    pub rest: Vec<[f64; 2]>,
    /// The point with the highest `y`.
    pub best: [f64; 2],
}

/// Reorder paired `xs` / `ys` by ascending `y`.
///
/// The sort is stable, so points with equal `y` keep their input order.
pub fn sort_by_secondary_key(xs: &[f64], ys: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if xs.len() != ys.len() {
        return Err(FigureError::LengthMismatch {
            expected: xs.len(),
            got: ys.len(),
        });
    }

    let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(pairs.into_iter().unzip())
}

/// Sort a group by `y` and pull out its highest point.
pub fn split_best(label: &str, xs: &[f64], ys: &[f64]) -> Result<RankedScatter> {
    let (xs, ys) = sort_by_secondary_key(xs, ys)?;
    let mut points: Vec<[f64; 2]> = xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect();

    let best = points.pop().ok_or_else(|| FigureError::EmptyInput {
        name: label.to_string(),
    })?;
    Ok(RankedScatter { rest: points, best })
}
