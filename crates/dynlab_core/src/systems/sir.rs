use crate::catalog::SystemId;
use crate::error::{ParameterError, Result};
use crate::models::{sir, SirParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::{Series, Trajectory};
use crate::traits::VectorField;

const SAMPLES: usize = 1000;
const NEGATIVE: &str = "population counts cannot be negative";

static PARAMETERS: [ParameterSpec; 6] = [
    ParameterSpec::real("S0", "Initial susceptible", "people", 990.0, (0.0, 1000.0), 10.0),
    ParameterSpec::real("I0", "Initial infected", "people", 10.0, (0.0, 100.0), 1.0),
    ParameterSpec::real("R0", "Initial recovered", "people", 0.0, (0.0, 100.0), 1.0),
    ParameterSpec::real("beta", "Transmission rate", "1/day", 0.3, (0.1, 1.0), 0.05),
    ParameterSpec::real("gamma", "Recovery rate", "1/day", 0.1, (0.01, 0.5), 0.01),
    ParameterSpec::real("t_max", "Duration", "days", 160.0, (50.0, 300.0), 10.0),
];

/// Kermack–McKendrick epidemic in a closed population.
#[derive(Debug, Clone, Default)]
pub struct Sir {
    pub settings: IntegratorSettings,
}

impl Sir {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for Sir {
    fn system(&self) -> SystemId {
        SystemId::Sir
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let s0 = params.non_negative("S0", NEGATIVE)?;
        let i0 = params.non_negative("I0", NEGATIVE)?;
        let r0 = params.non_negative("R0", NEGATIVE)?;
        let population = s0 + i0 + r0;
        if population <= 0.0 {
            return Err(ParameterError::out_of_domain(
                "S0",
                s0,
                "total population S0 + I0 + R0 must be positive",
            )
            .into());
        }

        let model = SirParams {
            beta: params.get("beta")?,
            gamma: params.get("gamma")?,
            population,
        };
        let field = VectorField::new(3, model, sir);
        let run = run_flow(
            self.system(),
            &field,
            &[s0, i0, r0],
            t_max,
            SAMPLES,
            &self.settings,
        )?;

        let total: Vec<f64> = (0..run.time.len())
            .map(|k| run.states.iter().map(|column| column[k]).sum::<f64>())
            .collect();
        run.finish(&["S", "I", "R"], vec![Series::new("N", total)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::test_support::map;

    #[test]
    fn population_is_conserved() {
        let traj = Sir::new().simulate(&map(&[])).expect("defaults");
        for n in traj.auxiliary("N").expect("N") {
            assert!((n - 1000.0).abs() / 1000.0 < 1e-6, "N drifted to {n}");
        }
    }

    #[test]
    fn epidemic_peaks_at_herd_immunity_threshold() {
        let traj = Sir::new().simulate(&map(&[])).expect("defaults");
        let infected = traj.component("I").expect("I");
        let susceptible = traj.component("S").expect("S");
        let (peak, _) = infected
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (k, &i)| if i > best.1 { (k, i) } else { best });
        // dI/dt = 0 where S = N gamma / beta.
        let threshold = 1000.0 * 0.1 / 0.3;
        assert!((susceptible[peak] - threshold).abs() < 15.0);
        assert!(peak > 0 && peak < infected.len() - 1);
    }

    #[test]
    fn empty_population_is_rejected() {
        let err = Sir::new()
            .simulate(&map(&[("S0", 0.0), ("I0", 0.0), ("R0", 0.0)]))
            .expect_err("nobody to infect");
        assert!(err.is_parameter());
    }

    #[test]
    fn negative_counts_are_rejected() {
        let err = Sir::new()
            .simulate(&map(&[("I0", -1.0)]))
            .expect_err("negative infected");
        assert!(err.is_parameter());
    }
}
