//! JS-independent decoding glue shared by the exported bindings.

use anyhow::Context;
use dynlab_core::{IntegratorSettings, SystemId};

pub(crate) fn parse_system(name: &str) -> anyhow::Result<SystemId> {
    name.parse::<SystemId>()
        .with_context(|| format!("Cannot create simulator `{name}`"))
}

pub(crate) fn check_settings(settings: IntegratorSettings) -> anyhow::Result<IntegratorSettings> {
    settings.validate().context("Invalid integrator settings")?;
    Ok(settings)
}

/// Flattens an error chain into the single string handed to JS.
pub(crate) fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
