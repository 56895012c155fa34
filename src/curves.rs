//! Closed-form curves evaluated over a linear grid.
//!
//! Every generator returns `[x, y]` pairs ready to hand to a [`Trace`].
//!
//! [`Trace`]: crate::figure::Trace

use std::f64::consts::{LN_2, PI};

use statrs::function::gamma::gamma;

use crate::error::{FigureError, Result};

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>> {
    if n < 2 {
        return Err(FigureError::InvalidParameter(format!(
            "grid needs at least 2 samples, got {n}"
        )));
    }
    if !(start.is_finite() && end.is_finite()) || start >= end {
        return Err(FigureError::InvalidParameter(format!(
            "grid bounds must be finite and increasing, got [{start}, {end}]"
        )));
    }

    let step = (end - start) / (n - 1) as f64;
    Ok((0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn check_scale(sigma: f64) -> Result<()> {
    if sigma > 0.0 && sigma.is_finite() {
        Ok(())
    } else {
        Err(FigureError::InvalidParameter(format!(
            "sigma must be positive, got {sigma}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Probability densities
// ---------------------------------------------------------------------------

/// Normal density `N(mu, sigma²)` at every grid point.
pub fn gaussian_pdf(grid: &[f64], mu: f64, sigma: f64) -> Result<Vec<[f64; 2]>> {
    check_scale(sigma)?;
    let norm = 1.0 / (sigma * (2.0 * PI).sqrt());
    Ok(grid
        .iter()
        .map(|&x| [x, norm * (-(x - mu).powi(2) / (2.0 * sigma * sigma)).exp()])
        .collect())
}

/// The Gaussian density squashed through a sigmoid and re-centred at zero.
pub fn sigmoid_gaussian(grid: &[f64], mu: f64, sigma: f64) -> Result<Vec<[f64; 2]>> {
    Ok(gaussian_pdf(grid, mu, sigma)?
        .into_iter()
        .map(|[x, p]| [x, sigmoid(p) - 0.5])
        .collect())
}

/// Generalized normal density with shape `beta`, scaled to standard
/// deviation `sigma`.
///
/// `beta = 1` is Laplace, `beta = 2` is Gaussian and large `beta` tends to a
/// uniform distribution.
pub fn generalized_gaussian_pdf(
    grid: &[f64],
    mu: f64,
    sigma: f64,
    beta: f64,
) -> Result<Vec<[f64; 2]>> {
    check_scale(sigma)?;
    if !(beta > 0.0 && beta.is_finite()) {
        return Err(FigureError::InvalidParameter(format!(
            "shape beta must be positive, got {beta}"
        )));
    }

    let g1 = gamma(1.0 / beta);
    let alpha = sigma * (g1 / gamma(3.0 / beta)).sqrt();
    let norm = beta / (2.0 * alpha * g1);
    if !(alpha.is_finite() && norm.is_finite()) {
        return Err(FigureError::InvalidParameter(format!(
            "shape beta {beta} is numerically out of range"
        )));
    }

    Ok(grid
        .iter()
        .map(|&x| [x, norm * (-((x - mu).abs() / alpha).powf(beta)).exp()])
        .collect())
}

// ---------------------------------------------------------------------------
// Loss functions of the margin g(x)·f(x)
// ---------------------------------------------------------------------------

/// Half-width of the margin range the log-sigmoid loss is drawn over.
pub const LOG_SIGMOID_SPAN: f64 = 2.5;

/// The five surrogate losses compared in the loss figure.
#[derive(Debug, Clone, PartialEq)]
pub struct LossCurves {
    pub ideal: Vec<[f64; 2]>,
    pub square: Vec<[f64; 2]>,
    pub log_sigmoid: Vec<[f64; 2]>,
    pub hinge: Vec<[f64; 2]>,
    pub sigmoid_square: Vec<[f64; 2]>,
}

impl LossCurves {
    /// Labelled curves in plotting order.
    pub fn labelled(self) -> Vec<(&'static str, Vec<[f64; 2]>)> {
        vec![
            ("Ideal Error", self.ideal),
            ("Square Error", self.square),
            ("Log Sigmoid", self.log_sigmoid),
            ("Hinge", self.hinge),
            ("Sigmoid Square", self.sigmoid_square),
        ]
    }
}

/// Evaluate every loss over `grid`.
///
/// The 0-1 loss is 1 on the first half of the samples. The log-sigmoid curve
/// is evaluated sample by sample on a margin grid spanning
/// `±LOG_SIGMOID_SPAN`, whatever range `grid` covers.
pub fn loss_curves(grid: &[f64]) -> LossCurves {
    let half = grid.len() / 2;
    let last = grid.len().saturating_sub(1);
    let margin = |i: usize| {
        if last == 0 {
            0.0
        } else {
            LOG_SIGMOID_SPAN * (2.0 * i as f64 / last as f64 - 1.0)
        }
    };

    LossCurves {
        ideal: eval(grid, |i, _| if i < half { 1.0 } else { 0.0 }),
        square: eval(grid, |_, x| (x - 1.0).powi(2)),
        log_sigmoid: eval(grid, |i, _| (1.0 + (-margin(i)).exp()).ln() / LN_2),
        hinge: eval(grid, |_, x| (1.0 - x).max(0.0)),
        sigmoid_square: eval(grid, |_, x| (sigmoid(x) - 1.0).powi(2)),
    }
}

fn eval(grid: &[f64], f: impl Fn(usize, f64) -> f64) -> Vec<[f64; 2]> {
    grid.iter().enumerate().map(|(i, &x)| [x, f(i, x)]).collect()
}
