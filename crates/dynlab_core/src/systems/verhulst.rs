use crate::catalog::SystemId;
use crate::error::{ParameterError, Result, SimulationError};
use crate::models::verhulst;
use crate::params::{ParameterSpec, Params};
use crate::simulator::SystemSimulator;
use crate::trajectory::{Series, Trajectory};

/// Hard cap on the iteration count; keeps a single call bounded in time and
/// memory.
pub const MAX_ITERATIONS: usize = 1_000_000;

static PARAMETERS: [ParameterSpec; 3] = [
    ParameterSpec::real("x0", "Initial fraction", "", 0.5, (0.0, 1.0), 0.01),
    ParameterSpec::real("r", "Growth rate", "", 3.2, (0.0, 4.0), 0.01),
    ParameterSpec::count("n", "Iterations", 100.0, (10.0, 500.0)),
];

/// The discrete logistic map. The time axis is the iteration index 0..=n.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerhulstMap;

impl VerhulstMap {
    pub fn new() -> Self {
        Self
    }
}

impl SystemSimulator for VerhulstMap {
    fn system(&self) -> SystemId {
        SystemId::VerhulstMap
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let mut x = params.within("x0", 0.0, 1.0, "initial value must lie in [0, 1]")?;
        let r = params.get("r")?;
        let n = params.count("n")?;
        let samples = match n.checked_add(1) {
            Some(samples) if n <= MAX_ITERATIONS => samples,
            _ => {
                return Err(ParameterError::out_of_domain(
                    "n",
                    params.get("n")?,
                    "iteration count exceeds 1000000",
                )
                .into())
            }
        };

        let mut values = Vec::with_capacity(samples);
        values.push(x);
        for index in 1..=n {
            x = verhulst(x, r);
            if !x.is_finite() {
                return Err(SimulationError::DivergentIterate { index }.into());
            }
            values.push(x);
        }

        let index = (0..=n).map(|k| k as f64).collect();
        Ok(Trajectory::new(index, vec![Series::new("x", values)], Vec::new())?)
    }
}
