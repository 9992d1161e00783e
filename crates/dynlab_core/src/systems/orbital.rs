use crate::catalog::SystemId;
use crate::error::{ParameterError, Result};
use crate::models::kepler;
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::{Series, Trajectory};
use crate::traits::VectorField;

const SAMPLES: usize = 2000;

static PARAMETERS: [ParameterSpec; 6] = [
    ParameterSpec::real("x0", "Initial x", "AU", 1.0, (0.5, 2.0), 0.1),
    ParameterSpec::real("y0", "Initial y", "AU", 0.0, (-2.0, 2.0), 0.1),
    ParameterSpec::real("vx0", "Initial x velocity", "AU/T", 0.0, (-2.0, 2.0), 0.1),
    ParameterSpec::real("vy0", "Initial y velocity", "AU/T", 1.0, (0.5, 2.0), 0.05),
    ParameterSpec::real("GM", "Gravitational parameter", "AU³/T²", 1.0, (0.1, 10.0), 0.1)
        .with_aliases(&["mu"]),
    ParameterSpec::real("t_max", "Duration", "T", 20.0, (5.0, 100.0), 5.0),
];

/// A test particle around a fixed point mass. Radius, specific angular
/// momentum and specific orbital energy are reported alongside the state.
#[derive(Debug, Clone, Default)]
pub struct Orbital {
    pub settings: IntegratorSettings,
}

impl Orbital {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for Orbital {
    fn system(&self) -> SystemId {
        SystemId::Orbital
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let gm = params.positive("GM", "gravitational parameter must be positive")?;
        let y0 = [
            params.get("x0")?,
            params.get("y0")?,
            params.get("vx0")?,
            params.get("vy0")?,
        ];
        if y0[0].hypot(y0[1]) <= 0.0 {
            return Err(ParameterError::out_of_domain(
                "x0",
                y0[0],
                "initial position cannot coincide with the central mass",
            )
            .into());
        }

        let field = VectorField::new(4, gm, kepler);
        let run = run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?;

        let samples = run.time.len();
        let mut radius = Vec::with_capacity(samples);
        let mut momentum = Vec::with_capacity(samples);
        let mut energy = Vec::with_capacity(samples);
        for k in 0..samples {
            let [x, y, vx, vy] = [0, 1, 2, 3].map(|c| run.states[c][k]);
            let r = x.hypot(y);
            radius.push(r);
            momentum.push(x * vy - y * vx);
            energy.push(0.5 * (vx * vx + vy * vy) - gm / r);
        }

        run.finish(
            &["x", "y", "vx", "vy"],
            vec![
                Series::new("r", radius),
                Series::new("L", momentum),
                Series::new("E", energy),
            ],
        )
    }
}
