use thiserror::Error;

/// Errors raised by the motion models and the mixture reduction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),
}

pub type Result<T> = std::result::Result<T, EstimationError>;

pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        log::debug!("{}: expected {} got {}", what, expected, found);
        return Err(EstimationError::DimensionMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

/// Time steps must be finite and non-negative.
pub(crate) fn check_ts(ts: f64) -> Result<()> {
    if !ts.is_finite() || ts < 0.0 {
        log::debug!("rejecting time step {}", ts);
        return Err(EstimationError::Configuration(format!(
            "time step must be finite and non-negative, got {}",
            ts
        )));
    }
    Ok(())
}

pub(crate) fn check_noise(name: &str, sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        log::debug!("rejecting {} = {}", name, sigma);
        return Err(EstimationError::Configuration(format!(
            "{} must be finite and strictly positive, got {}",
            name, sigma
        )));
    }
    Ok(())
}
