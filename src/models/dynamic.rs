use super::DynamicModel;
use crate::error::{check_len, check_noise, check_ts, EstimationError, Result};
use nalgebra::{DMatrix, DVector};

/// Writes the integrated white noise acceleration covariance for `dim`
/// position/velocity pairs into the leading `2 * dim` block of `Q`.
fn white_noise_acceleration_blocks(Q: &mut DMatrix<f64>, dim: usize, ts: f64) {
    Q.view_mut((0, 0), (dim, dim)).fill_diagonal(ts.powi(3) / 3.0);
    Q.view_mut((0, dim), (dim, dim)).fill_diagonal(ts.powi(2) / 2.0);
    Q.view_mut((dim, 0), (dim, dim)).fill_diagonal(ts.powi(2) / 2.0);
    Q.view_mut((dim, dim), (dim, dim)).fill_diagonal(ts);
}

/// Position plus velocity per dimension.
fn state_count(dim: usize) -> Result<usize> {
    dim.checked_mul(2).ok_or_else(|| {
        log::debug!("state count overflows for dim {}", dim);
        EstimationError::Configuration(format!(
            "{} dimensions exceed the representable state count",
            dim
        ))
    })
}

/// White noise acceleration model, also known as constant velocity (CV).
///
/// The state is `[position(dim), velocity(dim)]`. `sigma` is the square root
/// of the spectral density of the driving acceleration noise, so `Q` scales
/// with `sigma²`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteNoiseAcceleration {
    sigma: f64,
    dim: usize,
}

impl WhiteNoiseAcceleration {
    /// Planar model, `dim = 2`.
    pub fn new(sigma: f64) -> Result<Self> {
        Self::with_dim(sigma, 2)
    }

    pub fn with_dim(sigma: f64, dim: usize) -> Result<Self> {
        check_noise("sigma", sigma)?;
        if dim == 0 {
            log::debug!("rejecting zero-dimensional CV model");
            return Err(EstimationError::Configuration(
                "number of physical dimensions must be at least 1".to_string(),
            ));
        }
        state_count(dim)?;
        Ok(WhiteNoiseAcceleration { sigma, dim })
    }

    /// Like [`with_dim`](Self::with_dim) but also takes an explicit state
    /// count, which has to equal `2 * dim`.
    pub fn with_states(sigma: f64, dim: usize, n: usize) -> Result<Self> {
        let expected = state_count(dim)?;
        if n != expected {
            log::debug!("CV model with dim {} cannot have {} states", dim, n);
            return Err(EstimationError::Configuration(format!(
                "state count {} is inconsistent with {} dimensions (expected {})",
                n, dim, expected
            )));
        }
        Self::with_dim(sigma, dim)
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn check(&self, x: &DVector<f64>, ts: f64) -> Result<()> {
        check_ts(ts)?;
        check_len("state", self.n(), x.len())
    }
}

impl DynamicModel for WhiteNoiseAcceleration {
    type State = DVector<f64>;
    type Covariance = DMatrix<f64>;
    type Jacobian = DMatrix<f64>;

    fn n(&self) -> usize {
        2 * self.dim
    }

    fn f(&self, x: &Self::State, ts: f64) -> Result<Self::State> {
        self.check(x, ts)?;
        let dim = self.dim;
        let mut x_next = x.clone();
        let p = x.rows(0, dim);
        let u = x.rows(dim, dim);
        x_next.rows_mut(0, dim).copy_from(&(p + ts * u));
        Ok(x_next)
    }

    fn F(&self, x: &Self::State, ts: f64) -> Result<Self::Jacobian> {
        self.check(x, ts)?;
        let n = self.n();
        let mut F = DMatrix::<f64>::identity(n, n);
        F.view_mut((0, self.dim), (self.dim, self.dim))
            .fill_diagonal(ts);
        Ok(F)
    }

    fn Q(&self, x: &Self::State, ts: f64) -> Result<Self::Covariance> {
        self.check(x, ts)?;
        let n = self.n();
        let mut Q = DMatrix::zeros(n, n);
        white_noise_acceleration_blocks(&mut Q, self.dim, ts);
        Q *= self.sigma.powi(2);
        Ok(Q)
    }
}

/// Coordinated turn model with state `[x, y, u, v, omega]`.
///
/// Position and velocity are planar, `omega` is the turn rate. Acceleration
/// noise enters like in the CV model, the turn rate follows a random walk
/// with spectral density `sigma_w²`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTurn {
    sigma_a: f64,
    sigma_w: f64,
}

impl ConstantTurn {
    pub const N: usize = 5;

    pub fn new(sigma_a: f64, sigma_w: f64) -> Result<Self> {
        check_noise("sigma_a", sigma_a)?;
        check_noise("sigma_w", sigma_w)?;
        Ok(ConstantTurn { sigma_a, sigma_w })
    }

    pub fn sigma_a(&self) -> f64 {
        self.sigma_a
    }

    pub fn sigma_w(&self) -> f64 {
        self.sigma_w
    }

    fn check(&self, x: &DVector<f64>, ts: f64) -> Result<()> {
        check_ts(ts)?;
        check_len("state", Self::N, x.len())
    }
}

// Computes sin(x)/x
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-3 {
        1.0 - x.powi(2) / 6.0
    } else {
        x.sin() / x
    }
}

// Computes (1 - cos(x))/x
fn cosc(x: f64) -> f64 {
    if x.abs() < 1e-3 {
        x / 2.0 - x.powi(3) / 24.0
    } else {
        (1.0 - x.cos()) / x
    }
}

fn dsinc(x: f64) -> f64 {
    if x.abs() < 1e-3 {
        -x / 3.0
    } else {
        (x.cos() - sinc(x)) / x
    }
}

fn dcosc(x: f64) -> f64 {
    if x.abs() < 1e-3 {
        0.5 - x.powi(2) / 8.0
    } else {
        (x.sin() - cosc(x)) / x
    }
}

impl DynamicModel for ConstantTurn {
    type State = DVector<f64>;
    type Covariance = DMatrix<f64>;
    type Jacobian = DMatrix<f64>;

    fn n(&self) -> usize {
        Self::N
    }

    fn f(&self, x: &Self::State, ts: f64) -> Result<Self::State> {
        self.check(x, ts)?;
        let (x0, y0, u0, v0, omega) = (x[0], x[1], x[2], x[3], x[4]);

        let theta = omega * ts;
        let (sth, cth) = theta.sin_cos();
        let sincth = sinc(theta);
        let coscth = cosc(theta);

        Ok(DVector::from_row_slice(&[
            x0 + ts * u0 * sincth - ts * v0 * coscth,
            y0 + ts * u0 * coscth + ts * v0 * sincth,
            u0 * cth - v0 * sth,
            u0 * sth + v0 * cth,
            omega,
        ]))
    }

    fn F(&self, x: &Self::State, ts: f64) -> Result<Self::Jacobian> {
        self.check(x, ts)?;
        let (u0, v0, omega) = (x[2], x[3], x[4]);

        let theta = omega * ts;
        let (sth, cth) = theta.sin_cos();
        let sincth = sinc(theta);
        let coscth = cosc(theta);
        let dsincth = dsinc(theta);
        let dcoscth = dcosc(theta);

        #[rustfmt::skip]
        let F = DMatrix::<f64>::from_row_slice(
            5,
            5,
            &[
                1., 0., ts * sincth,  -ts * coscth, ts.powi(2) * (u0 * dsincth - v0 * dcoscth),
                0., 1., ts * coscth,  ts * sincth,  ts.powi(2) * (u0 * dcoscth + v0 * dsincth),
                0., 0., cth,          -sth,         -ts * (u0 * sth + v0 * cth),
                0., 0., sth,          cth,          ts * (u0 * cth - v0 * sth),
                0., 0., 0.,           0.,           1.,
            ],
        );
        Ok(F)
    }

    fn Q(&self, x: &Self::State, ts: f64) -> Result<Self::Covariance> {
        self.check(x, ts)?;
        let mut Q = DMatrix::zeros(Self::N, Self::N);
        white_noise_acceleration_blocks(&mut Q, 2, ts);
        Q *= self.sigma_a.powi(2);
        Q[(4, 4)] = ts * self.sigma_w.powi(2);
        Ok(Q)
    }
}

/// Any of the motion models, for filter banks that switch between them at
/// runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionModel {
    CV(WhiteNoiseAcceleration),
    CT(ConstantTurn),
}

impl From<WhiteNoiseAcceleration> for MotionModel {
    fn from(model: WhiteNoiseAcceleration) -> Self {
        MotionModel::CV(model)
    }
}

impl From<ConstantTurn> for MotionModel {
    fn from(model: ConstantTurn) -> Self {
        MotionModel::CT(model)
    }
}

impl DynamicModel for MotionModel {
    type State = DVector<f64>;
    type Covariance = DMatrix<f64>;
    type Jacobian = DMatrix<f64>;

    fn n(&self) -> usize {
        match self {
            MotionModel::CV(m) => m.n(),
            MotionModel::CT(m) => m.n(),
        }
    }

    fn f(&self, x: &Self::State, ts: f64) -> Result<Self::State> {
        match self {
            MotionModel::CV(m) => m.f(x, ts),
            MotionModel::CT(m) => m.f(x, ts),
        }
    }

    fn F(&self, x: &Self::State, ts: f64) -> Result<Self::Jacobian> {
        match self {
            MotionModel::CV(m) => m.F(x, ts),
            MotionModel::CT(m) => m.F(x, ts),
        }
    }

    fn Q(&self, x: &Self::State, ts: f64) -> Result<Self::Covariance> {
        match self {
            MotionModel::CV(m) => m.Q(x, ts),
            MotionModel::CT(m) => m.Q(x, ts),
        }
    }
}
