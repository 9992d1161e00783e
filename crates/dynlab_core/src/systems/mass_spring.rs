use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{mass_spring_damper, OscillatorParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::{Series, Trajectory};
use crate::traits::VectorField;

const SAMPLES: usize = 1000;

static PARAMETERS: [ParameterSpec; 8] = [
    ParameterSpec::real("m", "Mass", "kg", 1.0, (0.1, 10.0), 0.1),
    ParameterSpec::real("c", "Damping coefficient", "N·s/m", 0.5, (0.0, 10.0), 0.1),
    ParameterSpec::real("k", "Spring constant", "N/m", 2.0, (0.1, 20.0), 0.1),
    ParameterSpec::real("x0", "Initial displacement", "m", 1.0, (-5.0, 5.0), 0.1),
    ParameterSpec::real("v0", "Initial velocity", "m/s", 0.0, (-5.0, 5.0), 0.1),
    ParameterSpec::real("F0", "Driving amplitude", "N", 0.0, (0.0, 10.0), 0.5),
    ParameterSpec::real("omega_f", "Driving frequency", "rad/s", 1.0, (0.1, 5.0), 0.1),
    ParameterSpec::real("t_max", "Duration", "s", 30.0, (5.0, 100.0), 5.0),
];

/// Damped, optionally driven, harmonic oscillator. Mechanical energy
/// ½mv² + ½kx² is reported as an auxiliary series.
#[derive(Debug, Clone, Default)]
pub struct MassSpringDamper {
    pub settings: IntegratorSettings,
}

impl MassSpringDamper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for MassSpringDamper {
    fn system(&self) -> SystemId {
        SystemId::MassSpringDamper
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let model = OscillatorParams {
            mass: params.positive("m", "mass must be positive")?,
            damping: params.get("c")?,
            stiffness: params.get("k")?,
            force: params.get("F0")?,
            omega_f: params.get("omega_f")?,
        };
        let field = VectorField::new(2, model, mass_spring_damper);
        let y0 = [params.get("x0")?, params.get("v0")?];
        let run = run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?;

        let energy = run.states[0]
            .iter()
            .zip(&run.states[1])
            .map(|(x, v)| 0.5 * model.mass * v * v + 0.5 * model.stiffness * x * x)
            .collect();
        run.finish(&["x", "v"], vec![Series::new("E", energy)])
    }
}
