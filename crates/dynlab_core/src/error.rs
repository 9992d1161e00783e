//! Error kinds surfaced by the simulation layer.
//!
//! Input problems are reported as [`ParameterError`] before any numerical work
//! starts; numerical failures after validation are [`SimulationError`]. Both
//! are wrapped by [`SimError`] so callers can match on the kind while library
//! code propagates with `?`.

use thiserror::Error;

/// Invalid or incomplete parameter mapping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("missing required parameter `{name}`")]
    Missing { name: String },

    #[error("parameter `{name}` must be a finite number, got {value}")]
    NonFinite { name: String, value: f64 },

    #[error("parameter `{name}` must be a non-negative integer, got {value}")]
    NotInteger { name: String, value: f64 },

    #[error("parameter `{name}` = {value} is outside the model domain: {reason}")]
    OutOfDomain {
        name: String,
        value: f64,
        reason: &'static str,
    },
}

impl ParameterError {
    pub(crate) fn out_of_domain(name: &str, value: f64, reason: &'static str) -> Self {
        Self::OutOfDomain {
            name: name.to_string(),
            value,
            reason,
        }
    }
}

/// Numerical failure after the parameters were accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("non-finite value in component `{component}` at t = {t}")]
    NonFinite { component: String, t: f64 },

    #[error("step size underflow at t = {t} (h = {h:e}); the trajectory is likely diverging")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("integrator exceeded {max_steps} steps at t = {t} before reaching t = {t_end}")]
    MaxStepsExceeded { max_steps: usize, t: f64, t_end: f64 },

    #[error("iterate {index} of the map is not finite")]
    DivergentIterate { index: usize },

    #[error("series `{name}` has {found} samples, expected {expected}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Any failure of [`crate::simulator::SystemSimulator::simulate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

impl SimError {
    pub fn is_parameter(&self) -> bool {
        matches!(self, SimError::Parameter(_))
    }

    pub fn is_simulation(&self) -> bool {
        matches!(self, SimError::Simulation(_))
    }
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
