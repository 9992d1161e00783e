//! Parameter mappings, their static descriptions, and the merged view the
//! models read from.

use crate::error::ParameterError;
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

/// Named numeric inputs for one system.
pub type ParameterMap = BTreeMap<String, f64>;

/// Advisory (min, max) bounds per parameter. Not enforced by the simulators.
pub type RangeMap = BTreeMap<String, (f64, f64)>;

/// Static description of one parameter: default, slider range and display
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Integer-valued (e.g. an iteration count).
    pub integer: bool,
    /// Other names callers may use for this parameter.
    pub aliases: &'static [&'static str],
}

impl ParameterSpec {
    pub const fn real(
        name: &'static str,
        label: &'static str,
        unit: &'static str,
        default: f64,
        range: (f64, f64),
        step: f64,
    ) -> Self {
        Self {
            name,
            label,
            unit,
            default,
            min: range.0,
            max: range.1,
            step,
            integer: false,
            aliases: &[],
        }
    }

    pub const fn count(
        name: &'static str,
        label: &'static str,
        default: f64,
        range: (f64, f64),
    ) -> Self {
        Self {
            name,
            label,
            unit: "",
            default,
            min: range.0,
            max: range.1,
            step: 1.0,
            integer: true,
            aliases: &[],
        }
    }

    pub const fn with_aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    /// Whether `key` names this parameter, canonically or by alias.
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

/// The canonical name of the parameter `key` refers to, if any.
pub fn canonical_name(specs: &[ParameterSpec], key: &str) -> Option<&'static str> {
    specs
        .iter()
        .find(|spec| spec.answers_to(key))
        .map(|spec| spec.name)
}

pub fn defaults_of(specs: &[ParameterSpec]) -> ParameterMap {
    specs
        .iter()
        .map(|spec| (spec.name.to_string(), spec.default))
        .collect()
}

pub fn ranges_of(specs: &[ParameterSpec]) -> RangeMap {
    specs
        .iter()
        .map(|spec| (spec.name.to_string(), (spec.min, spec.max)))
        .collect()
}

/// A parameter mapping merged over the defaults and checked for finiteness.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    values: ParameterMap,
}

impl Params {
    /// Overlays `given` on the defaults of `specs`. Aliases are applied first
    /// so a canonical key wins over its alias; keys the system does not
    /// declare are dropped.
    pub fn resolve(specs: &[ParameterSpec], given: &ParameterMap) -> Result<Self, ParameterError> {
        let mut values = defaults_of(specs);
        for (key, value) in given {
            if values.contains_key(key) {
                continue;
            }
            match canonical_name(specs, key) {
                Some(name) => {
                    values.insert(name.to_string(), *value);
                }
                None => warn!("ignoring unknown parameter `{key}`"),
            }
        }
        for (key, value) in given {
            if let Some(slot) = values.get_mut(key) {
                *slot = *value;
            }
        }

        for spec in specs {
            let value = values[spec.name];
            if !value.is_finite() {
                return Err(ParameterError::NonFinite {
                    name: spec.name.to_string(),
                    value,
                });
            }
            if spec.integer && (value < 0.0 || value.fract() != 0.0) {
                return Err(ParameterError::NotInteger {
                    name: spec.name.to_string(),
                    value,
                });
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Result<f64, ParameterError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ParameterError::Missing {
                name: name.to_string(),
            })
    }

    pub fn count(&self, name: &str) -> Result<usize, ParameterError> {
        let value = self.get(name)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(ParameterError::NotInteger {
                name: name.to_string(),
                value,
            });
        }
        Ok(value as usize)
    }

    /// Reads `name` and requires it to be strictly positive.
    pub fn positive(&self, name: &str, reason: &'static str) -> Result<f64, ParameterError> {
        let value = self.get(name)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ParameterError::out_of_domain(name, value, reason))
        }
    }

    pub fn non_negative(&self, name: &str, reason: &'static str) -> Result<f64, ParameterError> {
        let value = self.get(name)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(ParameterError::out_of_domain(name, value, reason))
        }
    }

    /// Reads `name` and requires it to lie in the closed interval [lo, hi].
    pub fn within(
        &self,
        name: &str,
        lo: f64,
        hi: f64,
        reason: &'static str,
    ) -> Result<f64, ParameterError> {
        let value = self.get(name)?;
        if (lo..=hi).contains(&value) {
            Ok(value)
        } else {
            Err(ParameterError::out_of_domain(name, value, reason))
        }
    }

    pub fn as_map(&self) -> &ParameterMap {
        &self.values
    }

    pub fn into_map(self) -> ParameterMap {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: [ParameterSpec; 2] = [
        ParameterSpec::real("k", "Rate", "1/s", 0.5, (0.0, 1.0), 0.01),
        ParameterSpec::count("n", "Iterations", 10.0, (1.0, 100.0)),
    ];

    fn map(entries: &[(&str, f64)]) -> ParameterMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let params = Params::resolve(&SPECS, &map(&[("k", 0.9)])).expect("valid");
        assert_eq!(params.get("k"), Ok(0.9));
        assert_eq!(params.count("n"), Ok(10));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let params = Params::resolve(&SPECS, &map(&[("typo", 3.0)])).expect("valid");
        assert_eq!(params.as_map().len(), 2);
        assert!(matches!(params.get("typo"), Err(ParameterError::Missing { .. })));
    }

    #[test]
    fn aliases_resolve_to_the_canonical_name() {
        const ALIASED: [ParameterSpec; 1] =
            [ParameterSpec::real("GM", "G·M", "", 1.0, (0.1, 10.0), 0.1).with_aliases(&["mu"])];
        let params = Params::resolve(&ALIASED, &map(&[("mu", 3.0)])).expect("alias");
        assert_eq!(params.get("GM"), Ok(3.0));
        assert!(!params.as_map().contains_key("mu"));

        let params =
            Params::resolve(&ALIASED, &map(&[("mu", 3.0), ("GM", 4.0)])).expect("both");
        assert_eq!(params.get("GM"), Ok(4.0));
        assert_eq!(canonical_name(&ALIASED, "mu"), Some("GM"));
        assert_eq!(canonical_name(&ALIASED, "nu"), None);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = Params::resolve(&SPECS, &map(&[("k", f64::NAN)])).expect_err("NaN");
        assert!(matches!(err, ParameterError::NonFinite { ref name, .. } if name == "k"));
        let err = Params::resolve(&SPECS, &map(&[("k", f64::INFINITY)])).expect_err("inf");
        assert!(matches!(err, ParameterError::NonFinite { .. }));
    }

    #[test]
    fn integer_parameters_must_be_whole() {
        let err = Params::resolve(&SPECS, &map(&[("n", 2.5)])).expect_err("fractional");
        assert!(matches!(err, ParameterError::NotInteger { .. }));
        let err = Params::resolve(&SPECS, &map(&[("n", -1.0)])).expect_err("negative");
        assert!(matches!(err, ParameterError::NotInteger { .. }));
    }

    #[test]
    fn ranges_are_advisory() {
        let params = Params::resolve(&SPECS, &map(&[("k", 42.0)])).expect("out of range is fine");
        assert_eq!(params.get("k"), Ok(42.0));
    }

    #[test]
    fn domain_helpers_report_the_parameter() {
        let params = Params::resolve(&SPECS, &map(&[("k", 0.0)])).expect("valid");
        let err = params.positive("k", "rate must be positive").expect_err("zero");
        assert_eq!(
            err,
            ParameterError::OutOfDomain {
                name: "k".into(),
                value: 0.0,
                reason: "rate must be positive",
            }
        );
        assert_eq!(params.non_negative("k", "unused"), Ok(0.0));
        assert!(params.within("k", 0.1, 1.0, "outside").is_err());
    }

    #[test]
    fn defaults_and_ranges_share_keys() {
        let defaults = defaults_of(&SPECS);
        let ranges = ranges_of(&SPECS);
        assert!(defaults.keys().eq(ranges.keys()));
        assert_eq!(ranges["n"], (1.0, 100.0));
    }
}
