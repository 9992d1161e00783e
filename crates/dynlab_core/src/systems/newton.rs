use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{newton_cooling, CoolingParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::Trajectory;
use crate::traits::VectorField;

const SAMPLES: usize = 500;

static PARAMETERS: [ParameterSpec; 4] = [
    ParameterSpec::real("T0", "Initial temperature", "°C", 100.0, (0.0, 200.0), 1.0),
    ParameterSpec::real("T_env", "Ambient temperature", "°C", 20.0, (-20.0, 50.0), 0.5),
    ParameterSpec::real("k", "Cooling constant", "1/min", 0.1, (0.01, 1.0), 0.01),
    ParameterSpec::real("t_max", "Duration", "min", 50.0, (10.0, 200.0), 5.0),
];

/// A body relaxing toward ambient temperature.
#[derive(Debug, Clone, Default)]
pub struct NewtonCooling {
    pub settings: IntegratorSettings,
}

impl NewtonCooling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for NewtonCooling {
    fn system(&self) -> SystemId {
        SystemId::NewtonCooling
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let field = VectorField::new(
            1,
            CoolingParams {
                k: params.get("k")?,
                t_env: params.get("T_env")?,
            },
            newton_cooling,
        );
        let y0 = [params.get("T0")?];
        run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?
            .finish(&["T"], Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::test_support::map;
    use approx::assert_relative_eq;

    #[test]
    fn matches_exponential_relaxation() {
        let traj = NewtonCooling::new().simulate(&map(&[])).expect("defaults");
        let temps = traj.component("T").expect("T");
        assert_eq!(traj.len(), SAMPLES);
        for (t, temp) in traj.time.iter().zip(temps).step_by(50) {
            let exact = 20.0 + 80.0 * (-0.1 * t).exp();
            assert_relative_eq!(*temp, exact, max_relative = 1e-5);
        }
    }

    #[test]
    fn approaches_ambient_temperature() {
        let traj = NewtonCooling::new()
            .simulate(&map(&[("t_max", 100.0)]))
            .expect("long run");
        let last = traj.last("T").expect("T");
        assert!((last - 20.0).abs() < 0.2, "final temperature {last}");
    }

    #[test]
    fn heating_works_the_same_way() {
        let traj = NewtonCooling::new()
            .simulate(&map(&[("T0", 0.0), ("T_env", 40.0), ("k", 0.5)]))
            .expect("heating");
        let temps = traj.component("T").expect("T");
        assert!(temps.windows(2).all(|w| w[1] >= w[0] - 1e-4));
        assert_relative_eq!(temps[temps.len() - 1], 40.0, epsilon = 1e-3);
    }
}
