//! Gaussian mixture reduction by moment matching.
//!
//! A weighted set of Gaussians is replaced by the single Gaussian with the
//! same mean and covariance. The covariance follows the law of total
//! covariance: the weighted average of the component covariances plus the
//! weighted spread of the component means around the mixture mean.

use crate::error::{check_len, EstimationError, Result};
use itertools::izip;
use nalgebra::{DMatrix, DVector};

/// Allowed deviation of the weight sum from one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Gaussian with mean `x` and covariance `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussParams {
    pub x: DVector<f64>,
    pub P: DMatrix<f64>,
}

impl GaussParams {
    pub fn new(x: DVector<f64>, P: DMatrix<f64>) -> Self {
        GaussParams { x, P }
    }
}

/// Weighted collection of components, e.g. the mode states of an IMM.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureParameters<T> {
    pub weights: Vec<f64>,
    pub components: Vec<T>,
}

impl<T> MixtureParameters<T> {
    pub fn new(weights: Vec<f64>, components: Vec<T>) -> Self {
        MixtureParameters {
            weights,
            components,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.weights.iter().copied().zip(self.components.iter())
    }

    pub fn destructure(self) -> (Vec<f64>, Vec<T>) {
        (self.weights, self.components)
    }
}

impl MixtureParameters<GaussParams> {
    /// Collapses the mixture into one moment-matched Gaussian.
    pub fn reduce(&self) -> Result<GaussParams> {
        MixtureReducer.reduce_mixture(&self.weights, &self.components)
    }
}

pub trait ReduceMixture<T> {
    fn reduce_mixture(&self, weights: &[f64], components: &[T]) -> Result<T>;
}

/// Moment matching reducer for Gaussian mixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixtureReducer;

impl ReduceMixture<GaussParams> for MixtureReducer {
    fn reduce_mixture(&self, weights: &[f64], components: &[GaussParams]) -> Result<GaussParams> {
        check_len("mixture components", weights.len(), components.len())?;
        let (x, P) = moments(weights, components.iter().map(|c| (&c.x, &c.P)))?;
        Ok(GaussParams::new(x, P))
    }
}

/// Calculates the first two moments of a Gaussian mixture.
///
/// `w` holds the `N` weights, `mean` the `N` component means of length `n`
/// and `cov` the `N` component covariances of shape `n × n`. Returns the
/// mixture mean and covariance.
///
/// The weights must be finite, non-negative and sum to one within
/// [`WEIGHT_SUM_TOLERANCE`]; they are not renormalized. Components with zero
/// weight are skipped entirely, so they may carry non-finite values.
pub fn gaussian_mixture_moments(
    w: &[f64],
    mean: &[DVector<f64>],
    cov: &[DMatrix<f64>],
) -> Result<(DVector<f64>, DMatrix<f64>)> {
    check_len("mixture means", w.len(), mean.len())?;
    check_len("mixture covariances", w.len(), cov.len())?;
    moments(w, mean.iter().zip(cov.iter()))
}

fn validate_weights(w: &[f64]) -> Result<()> {
    if w.is_empty() {
        log::debug!("empty mixture");
        return Err(EstimationError::InvalidDistribution(
            "mixture has no components".to_string(),
        ));
    }
    if let Some((i, w_i)) = w
        .iter()
        .enumerate()
        .find(|(_, w_i)| !w_i.is_finite() || **w_i < 0.0)
    {
        log::debug!("invalid mixture weight {} at {}", w_i, i);
        return Err(EstimationError::InvalidDistribution(format!(
            "weight {} is {}, expected a finite non-negative value",
            i, w_i
        )));
    }
    let total: f64 = w.iter().sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        log::debug!("mixture weights sum to {}", total);
        return Err(EstimationError::InvalidDistribution(format!(
            "weights sum to {}, expected 1",
            total
        )));
    }
    Ok(())
}

// `components` is walked twice, once per moment.
fn moments<'a, I>(w: &[f64], components: I) -> Result<(DVector<f64>, DMatrix<f64>)>
where
    I: Iterator<Item = (&'a DVector<f64>, &'a DMatrix<f64>)> + Clone,
{
    validate_weights(w)?;

    let n = components
        .clone()
        .next()
        .map(|(m, _)| m.len())
        .ok_or(EstimationError::DimensionMismatch {
            what: "mixture components",
            expected: w.len(),
            found: 0,
        })?;
    for (m, c) in components.clone() {
        check_len("component mean", n, m.len())?;
        check_len("component covariance rows", n, c.nrows())?;
        check_len("component covariance columns", n, c.ncols())?;
    }
    log::trace!("reducing {} components of dimension {}", w.len(), n);

    // mean
    let mut mean_bar = DVector::zeros(n);
    for (&w_i, (m, _)) in izip!(w, components.clone()) {
        if w_i == 0.0 {
            continue;
        }
        mean_bar += w_i * m;
    }

    // covariance
    let mut cov_bar = DMatrix::zeros(n, n);
    for (&w_i, (m, c)) in izip!(w, components) {
        if w_i == 0.0 {
            continue;
        }
        // internal covariance
        cov_bar += w_i * c;
        // spread of means, d d' is exactly symmetric
        let d = m - &mean_bar;
        cov_bar += w_i * (&d * d.transpose());
    }

    Ok((mean_bar, cov_bar))
}
