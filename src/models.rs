pub mod config;
pub mod dynamic;

use crate::error::Result;

/// Discrete-time motion model as consumed by an EKF prediction step.
///
/// `f` is the zero-noise transition over `ts` time units, `F` its Jacobian
/// with respect to the state and `Q` the process noise covariance accumulated
/// over the same interval. Implementations are stateless: every call
/// allocates fresh output and never touches its input.
pub trait DynamicModel {
    type State;
    type Covariance;
    type Jacobian;

    /// Number of states.
    fn n(&self) -> usize;

    fn f(&self, x: &Self::State, ts: f64) -> Result<Self::State>;
    fn F(&self, x: &Self::State, ts: f64) -> Result<Self::Jacobian>;
    fn Q(&self, x: &Self::State, ts: f64) -> Result<Self::Covariance>;
}
