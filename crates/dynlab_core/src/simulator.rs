//! The shared simulator contract and the continuous-system pipeline.

use crate::catalog::SystemId;
use crate::error::{Result, SimError};
use crate::params::{defaults_of, ranges_of, ParameterMap, ParameterSpec, Params, RangeMap};
use crate::solvers::{integrate_on_grid, uniform_grid, IntegratorSettings};
use crate::trajectory::{Series, Trajectory};
use crate::traits::DynamicalSystem;
use log::{debug, warn};

/// Capability set every system in the catalogue implements.
///
/// Implementors describe their parameters through [`ParameterSpec`]s and
/// provide [`SystemSimulator::solve`]; merging over defaults, finiteness
/// checks and logging are shared by the provided methods.
pub trait SystemSimulator: Send + Sync {
    fn system(&self) -> SystemId;

    fn parameter_specs(&self) -> &'static [ParameterSpec];

    /// Checks the hard domain preconditions of the model and runs its
    /// integration or iteration strategy.
    fn solve(&self, params: &Params) -> Result<Trajectory>;

    /// A fresh copy of the canonical defaults.
    fn get_default_params(&self) -> ParameterMap {
        defaults_of(self.parameter_specs())
    }

    fn get_ranges(&self) -> RangeMap {
        ranges_of(self.parameter_specs())
    }

    /// Runs the system with `params` merged over the defaults.
    fn simulate(&self, params: &ParameterMap) -> Result<Trajectory> {
        let system = self.system();
        let resolved = Params::resolve(self.parameter_specs(), params).map_err(|err| {
            warn!("{system}: rejected parameters: {err}");
            SimError::from(err)
        })?;
        debug!("{system}: simulating with {:?}", resolved.as_map());

        let trajectory = self.solve(&resolved).map_err(|err| {
            warn!("{system}: {err}");
            err
        })?;
        debug!("{system}: produced {} samples", trajectory.len());
        Ok(trajectory)
    }

    /// As [`SystemSimulator::simulate`], with `overrides` taking precedence
    /// over `params`.
    fn simulate_with(&self, params: &ParameterMap, overrides: &[(&str, f64)]) -> Result<Trajectory> {
        let mut merged = params.clone();
        for (name, value) in overrides {
            merged.insert((*name).to_string(), *value);
        }
        self.simulate(&merged)
    }
}

/// Output of the continuous pipeline before packaging.
pub(crate) struct FlowRun {
    pub time: Vec<f64>,
    pub states: Vec<Vec<f64>>,
}

impl FlowRun {
    /// Names the state columns and attaches derived series.
    pub fn finish(self, names: &[&str], auxiliary: Vec<Series>) -> Result<Trajectory> {
        let components = names
            .iter()
            .zip(self.states)
            .map(|(name, values)| Series::new(*name, values))
            .collect();
        Ok(Trajectory::new(self.time, components, auxiliary)?)
    }
}

/// Builds the uniform grid on [0, t_max] and integrates `field` from `y0`
/// across it with dense output.
pub(crate) fn run_flow(
    system: SystemId,
    field: &impl DynamicalSystem,
    y0: &[f64],
    t_max: f64,
    samples: usize,
    settings: &IntegratorSettings,
) -> Result<FlowRun> {
    settings.validate()?;
    let time = uniform_grid(t_max, samples);
    let (states, stats) = integrate_on_grid(field, y0, &time, settings)?;
    debug!(
        "{system}: {} steps accepted, {} rejected, {} evaluations",
        stats.accepted, stats.rejected, stats.evaluations
    );
    Ok(FlowRun { time, states })
}

/// Reads the simulated duration shared by every continuous system.
pub(crate) fn duration(params: &Params) -> Result<f64> {
    Ok(params.positive("t_max", "simulated duration must be positive")?)
}
