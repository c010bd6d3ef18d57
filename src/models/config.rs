use super::dynamic::{ConstantTurn, MotionModel, WhiteNoiseAcceleration};
use crate::error::Result;
use serde::{Deserialize, Serialize};

fn default_dim() -> usize {
    2
}

/// Serializable description of a motion model.
///
/// ```json
/// { "model": "cv", "sigma": 0.5 }
/// { "model": "ct", "sigma_a": 0.1, "sigma_w": 0.006 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelConfig {
    Cv {
        sigma: f64,
        #[serde(default = "default_dim")]
        dim: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        n: Option<usize>,
    },
    Ct {
        sigma_a: f64,
        sigma_w: f64,
    },
}

impl ModelConfig {
    /// Validates the parameters and builds the model.
    pub fn build(&self) -> Result<MotionModel> {
        let model: MotionModel = match *self {
            ModelConfig::Cv { sigma, dim, n } => match n {
                Some(n) => WhiteNoiseAcceleration::with_states(sigma, dim, n)?.into(),
                None => WhiteNoiseAcceleration::with_dim(sigma, dim)?.into(),
            },
            ModelConfig::Ct { sigma_a, sigma_w } => ConstantTurn::new(sigma_a, sigma_w)?.into(),
        };
        log::trace!("built {:?}", model);
        Ok(model)
    }
}

impl From<&MotionModel> for ModelConfig {
    fn from(model: &MotionModel) -> Self {
        match model {
            MotionModel::CV(cv) => ModelConfig::Cv {
                sigma: cv.sigma(),
                dim: cv.dim(),
                n: None,
            },
            MotionModel::CT(ct) => ModelConfig::Ct {
                sigma_a: ct.sigma_a(),
                sigma_w: ct.sigma_w(),
            },
        }
    }
}
