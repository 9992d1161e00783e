use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{lorenz, LorenzParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::Trajectory;
use crate::traits::VectorField;

const SAMPLES: usize = 5000;

static PARAMETERS: [ParameterSpec; 7] = [
    ParameterSpec::real("x0", "Initial x", "", 1.0, (-10.0, 10.0), 0.5),
    ParameterSpec::real("y0", "Initial y", "", 1.0, (-10.0, 10.0), 0.5),
    ParameterSpec::real("z0", "Initial z", "", 1.0, (-10.0, 10.0), 0.5),
    ParameterSpec::real("sigma", "Prandtl number σ", "", 10.0, (1.0, 20.0), 0.5),
    ParameterSpec::real("rho", "Rayleigh number ρ", "", 28.0, (1.0, 50.0), 1.0),
    ParameterSpec::real("beta", "Geometric factor β", "", 8.0 / 3.0, (0.5, 5.0), 0.1),
    ParameterSpec::real("t_max", "Duration", "", 40.0, (10.0, 100.0), 5.0),
];

#[derive(Debug, Clone, Default)]
pub struct Lorenz {
    pub settings: IntegratorSettings,
}

impl Lorenz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for Lorenz {
    fn system(&self) -> SystemId {
        SystemId::Lorenz
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let model = LorenzParams {
            sigma: params.get("sigma")?,
            rho: params.get("rho")?,
            beta: params.get("beta")?,
        };
        let field = VectorField::new(3, model, lorenz);
        let y0 = [params.get("x0")?, params.get("y0")?, params.get("z0")?];
        run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?
            .finish(&["x", "y", "z"], Vec::new())
    }
}
