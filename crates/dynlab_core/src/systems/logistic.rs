use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{logistic, LogisticParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::Trajectory;
use crate::traits::VectorField;

const SAMPLES: usize = 500;

static PARAMETERS: [ParameterSpec; 4] = [
    ParameterSpec::real("N0", "Initial population", "individuals", 10.0, (1.0, 2000.0), 1.0),
    ParameterSpec::real("r", "Growth rate", "1/time", 0.2, (0.0, 1.0), 0.01),
    ParameterSpec::real("K", "Carrying capacity", "individuals", 1000.0, (100.0, 2000.0), 10.0),
    ParameterSpec::real("t_max", "Duration", "time", 50.0, (10.0, 200.0), 5.0),
];

/// Continuous logistic growth toward a carrying capacity.
#[derive(Debug, Clone, Default)]
pub struct LogisticGrowth {
    pub settings: IntegratorSettings,
}

impl LogisticGrowth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for LogisticGrowth {
    fn system(&self) -> SystemId {
        SystemId::LogisticGrowth
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let model = LogisticParams {
            r: params.get("r")?,
            capacity: params.positive("K", "carrying capacity must be positive")?,
        };
        let y0 = [params.non_negative("N0", "population cannot be negative")?];
        let field = VectorField::new(1, model, logistic);
        run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?
            .finish(&["N"], Vec::new())
    }
}
