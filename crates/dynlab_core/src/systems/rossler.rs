use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{rossler, RosslerParams};
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
    ParameterSpec::real("a", "a", "", 0.2, (0.1, 0.3), 0.01),
    ParameterSpec::real("b", "b", "", 0.2, (0.1, 0.4), 0.01),
    ParameterSpec::real("c", "c", "", 5.7, (3.0, 8.0), 0.1),
    ParameterSpec::real("t_max", "Duration", "", 100.0, (20.0, 300.0), 10.0),
];

#[derive(Debug, Clone, Default)]
pub struct Rossler {
    pub settings: IntegratorSettings,
}

impl Rossler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for Rossler {
    fn system(&self) -> SystemId {
        SystemId::Rossler
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let model = RosslerParams {
            a: params.get("a")?,
            b: params.get("b")?,
            c: params.get("c")?,
        };
        let field = VectorField::new(3, model, rossler);
        let y0 = [params.get("x0")?, params.get("y0")?, params.get("z0")?];
        run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?
            .finish(&["x", "y", "z"], Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::test_support::map;

    #[test]
    fn default_run_is_bounded() {
        let traj = Rossler::new().simulate(&map(&[])).expect("defaults");
        let [x, y, z] = traj.phase_3d().expect("three components");
        assert!(x.iter().chain(y).all(|v| v.abs() < 25.0));
        // z' = b > 0 on the plane z = 0, so z stays positive.
        assert!(z.iter().all(|v| *v > 0.0 && *v < 50.0));
    }

    #[test]
    fn trajectory_spirals_around_the_origin() {
        let traj = Rossler::new().simulate(&map(&[])).expect("defaults");
        let x = traj.component("x").expect("x");
        let crossings = x.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count();
        assert!(crossings > 10, "only {crossings} crossings");
    }

    #[test]
    fn runaway_z_growth_is_a_simulation_error() {
        // With c < 0 the z equation grows like exp(-c t) and never returns.
        let err = Rossler::new()
            .simulate(&map(&[("c", -50.0)]))
            .expect_err("z escapes");
        assert!(err.is_simulation(), "{err}");
    }
}
