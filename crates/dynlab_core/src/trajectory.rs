//! The normalized result shape every simulator returns.
//!
//! A [`Trajectory`] is a time (or iteration index) axis, the named state
//! components, and optional named auxiliary series derived from the state.
//! All series share the length of the time axis, so a plotting surface can
//! render any system without knowing which one produced it.

use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// One named sequence of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Deserialization goes through [`Trajectory::new`], so decoded values obey
/// the same length and finiteness rules as simulated ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrajectory")]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub components: Vec<Series>,
    #[serde(default)]
    pub auxiliary: Vec<Series>,
}

#[derive(Deserialize)]
struct RawTrajectory {
    time: Vec<f64>,
    components: Vec<Series>,
    #[serde(default)]
    auxiliary: Vec<Series>,
}

impl TryFrom<RawTrajectory> for Trajectory {
    type Error = SimulationError;

    fn try_from(raw: RawTrajectory) -> Result<Self, Self::Error> {
        Trajectory::new(raw.time, raw.components, raw.auxiliary)
    }
}

impl Trajectory {
    /// Assembles a trajectory, rejecting series whose length differs from the
    /// time axis or that contain non-finite samples.
    pub fn new(
        time: Vec<f64>,
        components: Vec<Series>,
        auxiliary: Vec<Series>,
    ) -> Result<Self, SimulationError> {
        let expected = time.len();
        for series in components.iter().chain(&auxiliary) {
            if series.values.len() != expected {
                return Err(SimulationError::ShapeMismatch {
                    name: series.name.clone(),
                    expected,
                    found: series.values.len(),
                });
            }
            if let Some(k) = series.values.iter().position(|v| !v.is_finite()) {
                return Err(SimulationError::NonFinite {
                    component: series.name.clone(),
                    t: time[k],
                });
            }
        }
        Ok(Self {
            time,
            components,
            auxiliary,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn component(&self, name: &str) -> Option<&[f64]> {
        find(&self.components, name)
    }

    pub fn auxiliary(&self, name: &str) -> Option<&[f64]> {
        find(&self.auxiliary, name)
    }

    /// Looks `name` up among the components first, then the auxiliary series.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.component(name).or_else(|| self.auxiliary(name))
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|s| s.name.as_str())
    }

    /// Final sample of a component or auxiliary series.
    pub fn last(&self, name: &str) -> Option<f64> {
        self.series(name).and_then(|values| values.last().copied())
    }

    /// The three state components a 3-D surface needs, in declaration order.
    /// `None` unless the system has exactly three components.
    pub fn phase_3d(&self) -> Option<[&[f64]; 3]> {
        match self.components.as_slice() {
            [a, b, c] => Some([&a.values, &b.values, &c.values]),
            _ => None,
        }
    }
}

fn find<'a>(series: &'a [Series], name: &str) -> Option<&'a [f64]> {
    series
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.values.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        Trajectory::new(
            vec![0.0, 1.0, 2.0],
            vec![
                Series::new("x", vec![1.0, 2.0, 3.0]),
                Series::new("y", vec![0.0, 0.0, 0.0]),
            ],
            vec![Series::new("r", vec![1.0, 2.0, 3.0])],
        )
        .expect("consistent lengths")
    }

    #[test]
    fn lookups_cover_components_and_auxiliary() {
        let traj = sample();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.component("x"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(traj.component("r"), None);
        assert_eq!(traj.series("r"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(traj.last("x"), Some(3.0));
        assert_eq!(traj.component_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn phase_3d_requires_three_components() {
        assert!(sample().phase_3d().is_none());
        let traj = Trajectory::new(
            vec![0.0],
            vec![
                Series::new("x", vec![1.0]),
                Series::new("y", vec![2.0]),
                Series::new("z", vec![3.0]),
            ],
            Vec::new(),
        )
        .expect("valid");
        let [x, y, z] = traj.phase_3d().expect("three components");
        assert_eq!((x[0], y[0], z[0]), (1.0, 2.0, 3.0));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Trajectory::new(
            vec![0.0, 1.0],
            vec![Series::new("x", vec![1.0])],
            Vec::new(),
        )
        .expect_err("length mismatch");
        assert_eq!(
            err,
            SimulationError::ShapeMismatch {
                name: "x".into(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let err = Trajectory::new(
            vec![0.0, 1.0],
            vec![Series::new("x", vec![1.0, 2.0])],
            vec![Series::new("E", vec![0.5, f64::INFINITY])],
        )
        .expect_err("infinite energy");
        assert!(matches!(err, SimulationError::NonFinite { ref component, t } if component == "E" && t == 1.0));
    }

    #[test]
    fn decoding_validates_series_lengths() {
        let json = r#"{"time":[0.0,1.0],"components":[{"name":"x","values":[1.0]}]}"#;
        let err = serde_json::from_str::<Trajectory>(json).expect_err("short series");
        assert!(err.to_string().contains("x"), "{err}");

        let decoded: Trajectory =
            serde_json::from_str(&serde_json::to_string(&sample()).expect("encode"))
                .expect("valid trajectory");
        assert_eq!(decoded, sample());
    }

    #[test]
    fn decoding_defaults_missing_auxiliary_series() {
        let json = r#"{"time":[0.0],"components":[{"name":"x","values":[2.0]}]}"#;
        let decoded: Trajectory = serde_json::from_str(json).expect("no auxiliary");
        assert!(decoded.auxiliary.is_empty());
        assert_eq!(decoded.last("x"), Some(2.0));
    }
}
