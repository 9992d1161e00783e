use crate::catalog::SystemId;
use crate::error::Result;
use crate::models::{rlc, RlcParams};
use crate::params::{ParameterSpec, Params};
use crate::simulator::{duration, run_flow, SystemSimulator};
use crate::solvers::IntegratorSettings;
use crate::trajectory::{Series, Trajectory};
use crate::traits::VectorField;

const SAMPLES: usize = 1000;

static PARAMETERS: [ParameterSpec; 7] = [
    ParameterSpec::real("R", "Resistance", "Ω", 10.0, (1.0, 100.0), 1.0),
    ParameterSpec::real("L", "Inductance", "H", 0.1, (0.01, 1.0), 0.01),
    ParameterSpec::real("C", "Capacitance", "F", 0.001, (0.0001, 0.01), 0.0001),
    ParameterSpec::real("V0", "Source voltage", "V", 10.0, (0.0, 50.0), 1.0),
    ParameterSpec::real("I0", "Initial current", "A", 0.0, (0.0, 5.0), 0.1),
    ParameterSpec::real("Q0", "Initial charge", "C", 0.0, (0.0, 0.1), 0.001),
    ParameterSpec::real("t_max", "Duration", "s", 0.5, (0.1, 2.0), 0.1),
];

/// Series resistor, inductor and capacitor on a constant source. The state
/// is the loop current and the capacitor charge; the capacitor voltage is
/// reported alongside.
#[derive(Debug, Clone, Default)]
pub struct Rlc {
    pub settings: IntegratorSettings,
}

impl Rlc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: IntegratorSettings) -> Self {
        Self { settings }
    }
}

impl SystemSimulator for Rlc {
    fn system(&self) -> SystemId {
        SystemId::Rlc
    }

    fn parameter_specs(&self) -> &'static [ParameterSpec] {
        &PARAMETERS
    }

    fn solve(&self, params: &Params) -> Result<Trajectory> {
        let t_max = duration(params)?;
        let circuit = RlcParams {
            r: params.get("R")?,
            l: params.positive("L", "inductance must be positive")?,
            c: params.positive("C", "capacitance must be positive")?,
            v0: params.get("V0")?,
        };
        let field = VectorField::new(2, circuit, rlc);
        let y0 = [params.get("I0")?, params.get("Q0")?];
        let run = run_flow(self.system(), &field, &y0, t_max, SAMPLES, &self.settings)?;

        let capacitor_voltage = run.states[1].iter().map(|q| q / circuit.c).collect();
        run.finish(&["I", "Q"], vec![Series::new("V_C", capacitor_voltage)])
    }
}
