//! Browser bridge for `dynlab_core`.
//!
//! Exposes the system catalogue and an editable simulator to a JS plotting
//! layer. Values cross the boundary through `serde-wasm-bindgen`; failures
//! surface as JS strings prefixed by their kind.

mod decode;
mod simulator;

pub use simulator::{list_systems, WasmSimulator};
