//! Exported catalogue listing and the stateful simulator handle.

use crate::decode::{check_settings, describe, parse_system};
use dynlab_core::{Experiment, IntegratorSettings, ParameterMap, SystemId};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SystemEntry {
    id: &'static str,
    title: &'static str,
    discrete: bool,
}

/// Plain JS objects instead of `Map`s for string-keyed maps.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// A mapping JS could not hand over as name → number is a parameter problem,
/// reported with the same prefix as the core's parameter errors.
fn mapping_error(err: &dyn std::fmt::Display) -> String {
    format!("parameter error: parameter mapping must map names to numbers: {err}")
}

fn js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&describe(&err))
}

/// Every system in the catalogue with its display title.
#[wasm_bindgen]
pub fn list_systems() -> Result<JsValue, JsValue> {
    let entries: Vec<SystemEntry> = SystemId::ALL
        .iter()
        .map(|id| SystemEntry {
            id: id.as_str(),
            title: id.title(),
            discrete: id.is_discrete(),
        })
        .collect();
    to_js(&entries)
}

/// One system plus an editable parameter set, for slider-driven pages.
#[wasm_bindgen]
pub struct WasmSimulator {
    experiment: Experiment,
}

#[wasm_bindgen]
impl WasmSimulator {
    #[wasm_bindgen(constructor)]
    pub fn new(system: &str) -> Result<WasmSimulator, JsValue> {
        console_error_panic_hook::set_once();

        let id = parse_system(system).map_err(js_error)?;
        Ok(WasmSimulator {
            experiment: Experiment::new(id),
        })
    }

    /// As the constructor, integrating with the given `IntegratorSettings`
    /// object instead of the defaults.
    pub fn with_settings(system: &str, settings_val: JsValue) -> Result<WasmSimulator, JsValue> {
        console_error_panic_hook::set_once();

        let id = parse_system(system).map_err(js_error)?;
        let settings: IntegratorSettings = from_value(settings_val)
            .map_err(|e| JsValue::from_str(&format!("Invalid integrator settings: {}", e)))?;
        let settings = check_settings(settings).map_err(js_error)?;
        Ok(WasmSimulator {
            experiment: Experiment::with_simulator(id.simulator_with(settings)),
        })
    }

    pub fn system(&self) -> String {
        self.experiment.system().to_string()
    }

    pub fn default_params(&self) -> Result<JsValue, JsValue> {
        to_js(&self.experiment.default_params())
    }

    pub fn ranges(&self) -> Result<JsValue, JsValue> {
        to_js(&self.experiment.ranges())
    }

    pub fn parameter_specs(&self) -> Result<JsValue, JsValue> {
        to_js(self.experiment.specs())
    }

    pub fn params(&self) -> Result<JsValue, JsValue> {
        to_js(self.experiment.params())
    }

    /// Returns `false` when the system has no parameter called `name`.
    pub fn set_param(&mut self, name: &str, value: f64) -> bool {
        self.experiment.set(name, value)
    }

    pub fn reset(&mut self) {
        self.experiment.reset();
    }

    /// Simulates with a (possibly partial) JS parameter object merged over the
    /// defaults. `undefined` or `null` runs the defaults.
    pub fn simulate(&self, params_val: JsValue) -> Result<JsValue, JsValue> {
        let params: ParameterMap = if params_val.is_undefined() || params_val.is_null() {
            ParameterMap::new()
        } else {
            from_value(params_val).map_err(|e| JsValue::from_str(&mapping_error(&e)))?
        };

        let trajectory = self
            .experiment
            .simulate(&params)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&trajectory)
    }

    /// Simulates with this handle's own parameter set.
    pub fn run(&self) -> Result<JsValue, JsValue> {
        let trajectory = self
            .experiment
            .run()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&trajectory)
    }
}
