use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::van_der_pol;
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::Trajectory;
use crate::traits::VectorField;

const SAMPLES: usize = 1000;

static PARAMETERS: [ParameterSpec; 4] = [
    ParameterSpec::real("x0", "Initial position", "", 1.0, (-3.0, 3.0), 0.1),
    ParameterSpec::real("v0", "Initial velocity", "", 0.0, (-3.0, 3.0), 0.1),
    ParameterSpec::real("mu", "Nonlinear damping", "", 1.0, (0.1, 10.0), 0.1),
    ParameterSpec::real("t_max", "Duration", "s", 50.0, (10.0, 100.0), 5.0),
];

/// Self-sustained relaxation oscillator.
///
/// Large `mu` makes the system stiff; the explicit integrator then runs into
/// its step budget and reports a simulation error rather than stalling.
#[derive(Debug, Clone, Default)]
pub struct VanDerPol {
    pub settings: IntegratorSettings,
}

impl VanDerPol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for VanDerPol {
    fn system(&self) -> SystemId {
        SystemId::VanDerPol
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let field = VectorField::new(2, params.get("mu")?, van_der_pol);
        let y0 = [params.get("x0")?, params.get("v0")?];
        run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?
            .finish(&["x", "v"], Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::test_support::map;

    #[test]
    fn settles_on_the_limit_cycle() {
        let traj = VanDerPol::new().simulate(&map(&[])).expect("defaults");
        let xs = traj.component("x").expect("x");
        let amplitude = xs[SAMPLES / 2..]
            .iter()
            .fold(0.0_f64, |acc, x| acc.max(x.abs()));
        assert!((amplitude - 2.0).abs() < 0.05, "amplitude {amplitude}");
    }

    #[test]
    fn small_start_grows_onto_the_cycle() {
        let traj = VanDerPol::new()
            .simulate(&map(&[("x0", 0.01), ("v0", 0.0)]))
            .expect("small start");
        let xs = traj.component("x").expect("x");
        let late = xs[SAMPLES * 3 / 4..]
            .iter()
            .fold(0.0_f64, |acc, x| acc.max(x.abs()));
        assert!(late > 1.9);
    }

    #[test]
    fn extreme_stiffness_is_a_simulation_error() {
        let err = VanDerPol::new()
            .simulate(&map(&[("mu", 1e6)]))
            .expect_err("stiff beyond the step budget");
        assert!(err.is_simulation());
    }
}
