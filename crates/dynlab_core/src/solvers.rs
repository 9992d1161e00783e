use crate::error::{ParameterError, SimulationError};
use crate::traits::DynamicalSystem;
use serde::{Deserialize, Serialize};

/// Tolerances and limits for the adaptive integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorSettings {
    pub rtol: f64,
    pub atol: f64,
    pub max_steps: usize,
    /// Initial step size. `None` picks one from the local derivative scale.
    #[serde(default)]
    pub first_step: Option<f64>,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-9,
            max_steps: 100_000,
            first_step: None,
        }
    }
}

impl IntegratorSettings {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.rtol.is_finite() && self.rtol > 0.0) {
            return Err(ParameterError::out_of_domain(
                "rtol",
                self.rtol,
                "relative tolerance must be positive",
            ));
        }
        if !(self.atol.is_finite() && self.atol > 0.0) {
            return Err(ParameterError::out_of_domain(
                "atol",
                self.atol,
                "absolute tolerance must be positive",
            ));
        }
        if self.max_steps == 0 {
            return Err(ParameterError::out_of_domain(
                "max_steps",
                0.0,
                "at least one step is required",
            ));
        }
        if let Some(h) = self.first_step {
            if !(h.is_finite() && h > 0.0) {
                return Err(ParameterError::out_of_domain(
                    "first_step",
                    h,
                    "initial step must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// `samples` evenly spaced points from 0 to `t_end`, both ends included.
pub fn uniform_grid(t_end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (samples - 1) as f64;
            let mut grid: Vec<f64> = (0..samples).map(|i| t_end * i as f64 / last).collect();
            grid[samples - 1] = t_end;
            grid
        }
    }
}

// Dormand–Prince 5(4) tableau.
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
const A: [[f64; 5]; 5] = [
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0, 0.0],
    [9017.0 / 3168.0, -355.0 / 33.0, 46732.0 / 5247.0, 49.0 / 176.0, -5103.0 / 18656.0],
];
const B: [f64; 6] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];
// Difference between the 5th and embedded 4th order weights (stage 7 is FSAL).
const E: [f64; 7] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];
// Continuous extension: row s holds the coefficients of sigma, sigma^2,
// sigma^3, sigma^4 multiplying stage s.
const P: [[f64; 4]; 7] = [
    [
        1.0,
        -8048581381.0 / 2820520608.0,
        8663915743.0 / 2820520608.0,
        -12715105075.0 / 11282082432.0,
    ],
    [0.0, 0.0, 0.0, 0.0],
    [
        0.0,
        131558114200.0 / 32700410799.0,
        -68118460800.0 / 10900136933.0,
        87487479700.0 / 32700410799.0,
    ],
    [
        0.0,
        -1754552775.0 / 470086768.0,
        14199869525.0 / 1410260304.0,
        -10690763975.0 / 1880347072.0,
    ],
    [
        0.0,
        127303824393.0 / 49829197408.0,
        -318862633887.0 / 49829197408.0,
        701980252875.0 / 199316789632.0,
    ],
    [
        0.0,
        -282668133.0 / 205662961.0,
        2019193451.0 / 616988883.0,
        -1453857185.0 / 822651844.0,
    ],
    [
        0.0,
        40617522.0 / 29380423.0,
        -110615467.0 / 29380423.0,
        69997945.0 / 29380423.0,
    ],
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

/// Dormand–Prince 5(4) stepper with its stage buffers.
pub struct DormandPrince45 {
    k: [Vec<f64>; 7],
    tmp: Vec<f64>,
    y_new: Vec<f64>,
}

impl DormandPrince45 {
    pub fn new(dim: usize) -> Self {
        Self {
            k: std::array::from_fn(|_| vec![0.0; dim]),
            tmp: vec![0.0; dim],
            y_new: vec![0.0; dim],
        }
    }

    /// Attempts one step of size `h` from (t, y). `k[0]` must already hold
    /// f(t, y). Returns the scaled RMS error estimate; a non-finite estimate
    /// means some stage overflowed.
    fn attempt(
        &mut self,
        system: &impl DynamicalSystem,
        t: f64,
        y: &[f64],
        h: f64,
        settings: &IntegratorSettings,
    ) -> f64 {
        let dim = y.len();
        if dim == 0 {
            return 0.0;
        }

        for stage in 1..6 {
            for i in 0..dim {
                let mut acc = 0.0;
                for (j, a) in A[stage - 1].iter().enumerate().take(stage) {
                    acc += a * self.k[j][i];
                }
                self.tmp[i] = y[i] + h * acc;
            }
            system.apply(t + C[stage] * h, &self.tmp, &mut self.k[stage]);
        }

        for i in 0..dim {
            let mut acc = 0.0;
            for (s, b) in B.iter().enumerate() {
                acc += b * self.k[s][i];
            }
            self.y_new[i] = y[i] + h * acc;
        }
        system.apply(t + h, &self.y_new, &mut self.k[6]);

        let mut sum = 0.0;
        for i in 0..dim {
            let mut err = 0.0;
            for (s, e) in E.iter().enumerate() {
                err += e * self.k[s][i];
            }
            let scale = settings.atol + settings.rtol * y[i].abs().max(self.y_new[i].abs());
            let ratio = h * err / scale;
            sum += ratio * ratio;
        }
        (sum / dim as f64).sqrt()
    }

    /// Evaluates the continuous extension of the last attempted step at
    /// t_old + sigma * h.
    fn dense(&self, y_old: &[f64], h: f64, sigma: f64, out: &mut [f64]) {
        let mut weights = [0.0; 7];
        for (w, row) in weights.iter_mut().zip(P.iter()) {
            let mut power = sigma;
            for coeff in row {
                *w += coeff * power;
                power *= sigma;
            }
        }
        for i in 0..y_old.len() {
            let mut acc = 0.0;
            for (s, w) in weights.iter().enumerate() {
                acc += w * self.k[s][i];
            }
            out[i] = y_old[i] + h * acc;
        }
    }
}

/// Outcome counters of one integration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub accepted: usize,
    pub rejected: usize,
    pub evaluations: usize,
}

/// Integrates `system` from `y0` at `grid[0]` across the increasing `grid`,
/// returning one sample vector per state component, evaluated exactly at the
/// grid points through dense output.
pub fn integrate_on_grid(
    system: &impl DynamicalSystem,
    y0: &[f64],
    grid: &[f64],
    settings: &IntegratorSettings,
) -> Result<(Vec<Vec<f64>>, SolveStats), SimulationError> {
    let dim = system.dimension();
    if y0.len() != dim {
        return Err(SimulationError::ShapeMismatch {
            name: "initial state".to_string(),
            expected: dim,
            found: y0.len(),
        });
    }

    let mut samples: Vec<Vec<f64>> = vec![Vec::with_capacity(grid.len()); dim];
    let mut stats = SolveStats::default();
    let Some((&t0, rest)) = grid.split_first() else {
        return Ok((samples, stats));
    };
    push_sample(&mut samples, y0);
    if rest.is_empty() {
        return Ok((samples, stats));
    }
    let t_end = grid[grid.len() - 1];

    let mut stepper = DormandPrince45::new(dim);
    let mut t = t0;
    let mut y = y0.to_vec();
    let mut buffer = vec![0.0; dim];

    system.apply(t, &y, &mut stepper.k[0]);
    stats.evaluations += 1;
    check_finite(&stepper.k[0], t)?;

    let mut h = match settings.first_step {
        Some(h) => h,
        None => {
            stats.evaluations += 1;
            initial_step(system, t, &y, &stepper.k[0], t_end - t, settings)
        }
    };
    let h_min = 16.0 * f64::EPSILON * t0.abs().max(t_end.abs());
    let mut next = 1;
    let mut rejected_last = false;

    while t < t_end {
        if stats.accepted + stats.rejected >= settings.max_steps {
            return Err(SimulationError::MaxStepsExceeded {
                max_steps: settings.max_steps,
                t,
                t_end,
            });
        }
        if h < h_min {
            return Err(SimulationError::StepSizeUnderflow { t, h });
        }
        h = h.min(t_end - t);

        let err = stepper.attempt(system, t, &y, h, settings);
        stats.evaluations += 6;

        if err.is_finite() && err <= 1.0 {
            let t_new = if t_end - (t + h) <= h_min { t_end } else { t + h };
            while next < grid.len() && grid[next] <= t_new {
                let sigma = (grid[next] - t) / h;
                stepper.dense(&y, h, sigma.min(1.0), &mut buffer);
                check_finite(&buffer, grid[next])?;
                push_sample(&mut samples, &buffer);
                next += 1;
            }

            y.copy_from_slice(&stepper.y_new);
            stepper.k.swap(0, 6);
            t = t_new;
            stats.accepted += 1;

            let mut factor = if err == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
            };
            if rejected_last {
                factor = factor.min(1.0);
            }
            h *= factor;
            rejected_last = false;
        } else {
            let factor = if err.is_finite() {
                (SAFETY * err.powf(ERROR_EXPONENT)).max(MIN_FACTOR)
            } else {
                MIN_FACTOR
            };
            h *= factor;
            stats.rejected += 1;
            rejected_last = true;
        }
    }

    // Grid points that rounding left at the very end coincide with t_end.
    while next < grid.len() {
        push_sample(&mut samples, &y);
        next += 1;
    }

    Ok((samples, stats))
}

fn push_sample(samples: &mut [Vec<f64>], state: &[f64]) {
    for (series, value) in samples.iter_mut().zip(state) {
        series.push(*value);
    }
}

fn check_finite(values: &[f64], t: f64) -> Result<(), SimulationError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SimulationError::NonFinite {
            component: format!("state[{index}]"),
            t,
        }),
        None => Ok(()),
    }
}

fn rms_scaled(values: impl Iterator<Item = f64>, scale: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (v, s) in values.zip(scale) {
        let r = v / s;
        sum += r * r;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).sqrt()
    }
}

/// Hairer–Wanner starting step estimate.
fn initial_step(
    system: &impl DynamicalSystem,
    t0: f64,
    y0: &[f64],
    f0: &[f64],
    span: f64,
    settings: &IntegratorSettings,
) -> f64 {
    let scale: Vec<f64> = y0
        .iter()
        .map(|y| settings.atol + y.abs() * settings.rtol)
        .collect();
    let d0 = rms_scaled(y0.iter().copied(), &scale);
    let d1 = rms_scaled(f0.iter().copied(), &scale);
    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };
    let h0 = h0.min(span);

    let y1: Vec<f64> = y0.iter().zip(f0).map(|(y, f)| y + h0 * f).collect();
    let mut f1 = vec![0.0; y0.len()];
    system.apply(t0 + h0, &y1, &mut f1);
    let d2 = rms_scaled(f1.iter().zip(f0).map(|(a, b)| a - b), &scale) / h0;
    if !d2.is_finite() {
        return h0;
    }

    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / 5.0)
    };
    (100.0 * h0).min(h1).min(span)
}
