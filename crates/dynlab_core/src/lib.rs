//! Simulation layer for a catalogue of classic dynamical systems.
//!
//! Every system implements [`SystemSimulator`]: it publishes its parameters
//! with defaults and advisory ranges, and turns a (possibly partial)
//! parameter mapping into a [`Trajectory`] of named, equal-length series.
//!
//! Key components:
//! - **Models**: pure right-hand sides and the Verhulst recurrence.
//! - **Solvers**: an adaptive Dormand–Prince 5(4) integrator with dense
//!   output onto a fixed sampling grid.
//! - **Systems**: one simulator per catalogue entry, addressable through
//!   [`SystemId`].
//! - **Experiment**: an editable parameter set bound to one simulator.

pub mod catalog;
pub mod error;
pub mod experiment;
pub mod models;
pub mod params;
pub mod simulator;
pub mod solvers;
pub mod systems;
pub mod traits;
pub mod trajectory;

pub use catalog::{SystemId, UnknownSystem};
pub use error::{ParameterError, SimError, SimulationError};
pub use experiment::Experiment;
pub use params::{ParameterMap, ParameterSpec, RangeMap};
pub use simulator::SystemSimulator;
pub use solvers::IntegratorSettings;
pub use trajectory::{Series, Trajectory};
