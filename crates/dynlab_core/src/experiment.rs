//! An editable parameter set bound to one simulator, the state a
//! slider-driven exercise page keeps between runs.

use crate::catalog::SystemId;
use crate::error::Result;
use crate::params::{canonical_name, ParameterMap, ParameterSpec, RangeMap};
use crate::simulator::SystemSimulator;
use crate::trajectory::Trajectory;
use log::warn;

pub struct Experiment {
    simulator: Box<dyn SystemSimulator>,
    params: ParameterMap,
}

impl Experiment {
    pub fn new(system: SystemId) -> Self {
        Self::with_simulator(system.simulator())
    }

    /// Wraps a preconfigured simulator, e.g. one built with custom
    /// integrator settings.
    pub fn with_simulator(simulator: Box<dyn SystemSimulator>) -> Self {
        let params = simulator.get_default_params();
        Self { simulator, params }
    }

    pub fn system(&self) -> SystemId {
        self.simulator.system()
    }

    pub fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub fn specs(&self) -> &'static [ParameterSpec] {
        self.simulator.parameter_specs()
    }

    pub fn default_params(&self) -> ParameterMap {
        self.simulator.get_default_params()
    }

    pub fn ranges(&self) -> RangeMap {
        self.simulator.get_ranges()
    }

    /// Updates one parameter, by canonical name or alias. Returns `false`,
    /// leaving the set untouched, when the system has no such parameter.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = canonical_name(self.specs(), name).and_then(|key| self.params.get_mut(key));
        match slot {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                warn!("{}: no parameter named `{name}`", self.system());
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.params = self.simulator.get_default_params();
    }

    pub fn run(&self) -> Result<Trajectory> {
        self.simulator.simulate(&self.params)
    }

    /// One-off run with `params` merged over the defaults; the edited set is
    /// left alone.
    pub fn simulate(&self, params: &ParameterMap) -> Result<Trajectory> {
        self.simulator.simulate(params)
    }
}

impl std::fmt::Debug for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experiment")
            .field("system", &self.system())
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_defaults_and_resets() {
        let mut exp = Experiment::new(SystemId::Hopf);
        assert_eq!(exp.params()["mu"], 0.5);
        assert!(exp.set("mu", -1.0));
        assert_eq!(exp.params()["mu"], -1.0);
        exp.reset();
        assert_eq!(exp.params(), &exp.default_params());
    }

    #[test]
    fn unknown_names_are_not_inserted() {
        let mut exp = Experiment::new(SystemId::VerhulstMap);
        assert!(!exp.set("sigma", 1.0));
        assert!(!exp.params().contains_key("sigma"));
    }

    #[test]
    fn aliases_edit_the_canonical_parameter() {
        let mut exp = Experiment::new(SystemId::Orbital);
        assert!(exp.set("mu", 2.5));
        assert_eq!(exp.params()["GM"], 2.5);
        assert!(!exp.params().contains_key("mu"));
    }

    #[test]
    fn run_uses_the_edited_values() {
        let mut exp = Experiment::new(SystemId::VerhulstMap);
        exp.set("n", 20.0);
        exp.set("x0", 0.0);
        let traj = exp.run().expect("valid");
        assert_eq!(traj.len(), 21);
        assert!(traj.component("x").expect("x").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn one_off_simulation_ignores_the_edited_set() {
        let mut exp = Experiment::new(SystemId::VerhulstMap);
        exp.set("n", 5.0);
        let traj = exp.simulate(&ParameterMap::new()).expect("defaults");
        assert_eq!(traj.len(), 101);
        assert_eq!(exp.params()["n"], 5.0);
    }

    #[test]
    fn invalid_edits_surface_on_run() {
        let mut exp = Experiment::new(SystemId::MassSpringDamper);
        exp.set("m", 0.0);
        assert!(exp.run().expect_err("zero mass").is_parameter());
    }
}
