#![allow(non_snake_case)]
//! Motion models and Gaussian mixture reduction for EKF and IMM trackers.
pub mod error;
pub mod mixture;
pub mod models;

pub use error::{EstimationError, Result};
pub use mixture::{
    gaussian_mixture_moments, GaussParams, MixtureParameters, MixtureReducer, ReduceMixture,
};
pub use models::{
    config::ModelConfig,
    dynamic::{ConstantTurn, MotionModel, WhiteNoiseAcceleration},
    DynamicModel,
};
