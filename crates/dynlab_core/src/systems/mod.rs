//! Concrete simulators, one per system in the catalogue.
//!
//! Continuous systems integrate their model from [`crate::models`] with the
//! adaptive solver and carry their own [`crate::solvers::IntegratorSettings`];
//! the Verhulst map iterates directly.

mod hopf;
mod logistic;
mod lorenz;
mod mass_spring;
mod newton;
mod orbital;
mod rlc;
mod rossler;
mod sir;
mod van_der_pol;
mod verhulst;

pub use hopf::Hopf;
pub use logistic::LogisticGrowth;
pub use lorenz::Lorenz;
pub use mass_spring::MassSpringDamper;
pub use newton::NewtonCooling;
pub use orbital::Orbital;
pub use rlc::Rlc;
pub use rossler::Rossler;
pub use sir::Sir;
pub use van_der_pol::VanDerPol;
pub use verhulst::VerhulstMap;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::params::ParameterMap;

    pub fn map(entries: &[(&str, f64)]) -> ParameterMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }
}
