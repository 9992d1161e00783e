use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{hopf, HopfParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::{Series, Trajectory};
use crate::traits::VectorField;

const SAMPLES: usize = 1000;

static PARAMETERS: [ParameterSpec; 5] = [
    ParameterSpec::real("x0", "Initial x", "", 0.1, (-2.0, 2.0), 0.1),
    ParameterSpec::real("y0", "Initial y", "", 0.1, (-2.0, 2.0), 0.1),
    ParameterSpec::real("mu", "Bifurcation parameter μ", "", 0.5, (-2.0, 3.0), 0.1),
    ParameterSpec::real("omega", "Angular frequency ω", "rad/s", 1.0, (0.1, 3.0), 0.1),
    ParameterSpec::real("t_max", "Duration", "s", 50.0, (10.0, 100.0), 5.0),
];

/// Normal form of the supercritical Hopf bifurcation. For mu > 0 orbits
/// settle on a circle of radius sqrt(mu); for mu < 0 they decay to the origin.
#[derive(Debug, Clone, Default)]
pub struct Hopf {
    pub settings: IntegratorSettings,
}

impl Hopf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for Hopf {
    fn system(&self) -> SystemId {
        SystemId::Hopf
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let model = HopfParams {
            mu: params.get("mu")?,
            omega: params.get("omega")?,
        };
        let field = VectorField::new(2, model, hopf);
        let y0 = [params.get("x0")?, params.get("y0")?];
        let run = run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?;

        let radius = run.states[0]
            .iter()
            .zip(&run.states[1])
            .map(|(x, y)| x.hypot(*y))
            .collect();
        run.finish(&["x", "y"], vec![Series::new("r", radius)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::test_support::map;
    use approx::assert_relative_eq;

    #[test]
    fn supercritical_orbit_reaches_the_limit_cycle() {
        let traj = Hopf::new().simulate(&map(&[])).expect("defaults");
        let r = traj.last("r").expect("r");
        assert_relative_eq!(r, 0.5_f64.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn subcritical_orbit_decays() {
        let traj = Hopf::new()
            .simulate(&map(&[("mu", -0.5)]))
            .expect("stable focus");
        assert!(traj.last("r").expect("r") < 1e-6);
    }

    #[test]
    fn radius_tracks_the_state() {
        let traj = Hopf::new()
            .simulate(&map(&[("mu", 2.0), ("x0", 1.0), ("y0", -1.0)]))
            .expect("large mu");
        let (x, y, r) = (
            traj.component("x").expect("x"),
            traj.component("y").expect("y"),
            traj.auxiliary("r").expect("r"),
        );
        for k in (0..traj.len()).step_by(97) {
            assert_relative_eq!(r[k], (x[k] * x[k] + y[k] * y[k]).sqrt(), epsilon = 1e-12);
        }
        assert_relative_eq!(r[r.len() - 1], 2.0_f64.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn overflowing_start_is_a_simulation_error() {
        let err = Hopf::new()
            .simulate(&map(&[("x0", 1e150)]))
            .expect_err("cubic term overflows");
        assert!(matches!(
            err,
            crate::error::SimError::Simulation(crate::error::SimulationError::NonFinite { .. })
        ));
    }
}
