//! Identifiers for the systems in the catalogue.

use crate::simulator::SystemSimulator;
use crate::solvers::IntegratorSettings;
use crate::systems::{
    Hopf, LogisticGrowth, Lorenz, MassSpringDamper, NewtonCooling, Orbital, Rlc, Rossler, Sir,
    VanDerPol, VerhulstMap,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemId {
    #[serde(rename = "newton")]
    NewtonCooling,
    #[serde(rename = "van_der_pol")]
    VanDerPol,
    #[serde(rename = "sir")]
    Sir,
    #[serde(rename = "rlc")]
    Rlc,
    #[serde(rename = "lorenz")]
    Lorenz,
    #[serde(rename = "rossler")]
    Rossler,
    #[serde(rename = "hopf")]
    Hopf,
    #[serde(rename = "logistic")]
    LogisticGrowth,
    #[serde(rename = "verhulst")]
    VerhulstMap,
    #[serde(rename = "orbital")]
    Orbital,
    #[serde(rename = "mass_spring")]
    MassSpringDamper,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown system `{0}`")]
pub struct UnknownSystem(pub String);

impl SystemId {
    pub const ALL: [SystemId; 11] = [
        SystemId::NewtonCooling,
        SystemId::VanDerPol,
        SystemId::Sir,
        SystemId::Rlc,
        SystemId::Lorenz,
        SystemId::Rossler,
        SystemId::Hopf,
        SystemId::LogisticGrowth,
        SystemId::VerhulstMap,
        SystemId::Orbital,
        SystemId::MassSpringDamper,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SystemId::NewtonCooling => "newton",
            SystemId::VanDerPol => "van_der_pol",
            SystemId::Sir => "sir",
            SystemId::Rlc => "rlc",
            SystemId::Lorenz => "lorenz",
            SystemId::Rossler => "rossler",
            SystemId::Hopf => "hopf",
            SystemId::LogisticGrowth => "logistic",
            SystemId::VerhulstMap => "verhulst",
            SystemId::Orbital => "orbital",
            SystemId::MassSpringDamper => "mass_spring",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SystemId::NewtonCooling => "Newton's law of cooling",
            SystemId::VanDerPol => "Van der Pol oscillator",
            SystemId::Sir => "SIR epidemic model",
            SystemId::Rlc => "Series RLC circuit",
            SystemId::Lorenz => "Lorenz attractor",
            SystemId::Rossler => "Rössler attractor",
            SystemId::Hopf => "Hopf bifurcation",
            SystemId::LogisticGrowth => "Logistic growth",
            SystemId::VerhulstMap => "Verhulst map",
            SystemId::Orbital => "Orbital mechanics",
            SystemId::MassSpringDamper => "Mass-spring-damper",
        }
    }

    /// Discrete systems evolve by iteration instead of integration.
    pub fn is_discrete(self) -> bool {
        matches!(self, SystemId::VerhulstMap)
    }

    /// A simulator with default integrator settings. Never fails.
    pub fn simulator(self) -> Box<dyn SystemSimulator> {
        self.simulator_with(IntegratorSettings::default())
    }

    /// A simulator integrating with `settings`. The Verhulst map has no
    /// integrator and ignores them.
    pub fn simulator_with(self, settings: IntegratorSettings) -> Box<dyn SystemSimulator> {
        match self {
            SystemId::NewtonCooling => Box::new(NewtonCooling::with_settings(settings)),
            SystemId::VanDerPol => Box::new(VanDerPol::with_settings(settings)),
            SystemId::Sir => Box::new(Sir::with_settings(settings)),
            SystemId::Rlc => Box::new(Rlc::with_settings(settings)),
            SystemId::Lorenz => Box::new(Lorenz::with_settings(settings)),
            SystemId::Rossler => Box::new(Rossler::with_settings(settings)),
            SystemId::Hopf => Box::new(Hopf::with_settings(settings)),
            SystemId::LogisticGrowth => Box::new(LogisticGrowth::with_settings(settings)),
            SystemId::VerhulstMap => Box::new(VerhulstMap::new()),
            SystemId::Orbital => Box::new(Orbital::with_settings(settings)),
            SystemId::MassSpringDamper => Box::new(MassSpringDamper::with_settings(settings)),
        }
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemId {
    type Err = UnknownSystem;

    /// Accepts the canonical identifiers plus the names the exercise layer
    /// historically used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let id = match key.as_str() {
            "newton" | "newton_cooling" => SystemId::NewtonCooling,
            "van_der_pol" | "vanderpol" => SystemId::VanDerPol,
            "sir" => SystemId::Sir,
            "rlc" => SystemId::Rlc,
            "lorenz" => SystemId::Lorenz,
            "rossler" | "rössler" | "mariposa" => SystemId::Rossler,
            "hopf" => SystemId::Hopf,
            "logistic" | "logistico" | "logistica" => SystemId::LogisticGrowth,
            "verhulst" => SystemId::VerhulstMap,
            "orbital" | "orbitas" => SystemId::Orbital,
            "mass_spring" | "amortiguador" | "amortiguadores" => SystemId::MassSpringDamper,
            _ => return Err(UnknownSystem(s.to_string())),
        };
        Ok(id)
    }
}
