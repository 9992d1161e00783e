//! Governing equations of the catalogue, as pure functions.
//!
//! Continuous models share the [`crate::traits::Rhs`] signature
//! `(t, state, params, out)` and write d(state)/dt into `out`. Second-order
//! systems carry velocity as an explicit state component. The discrete
//! Verhulst map is a plain recurrence.

/// dT/dt = -k (T - T_env)
#[derive(Debug, Clone, Copy)]
pub struct CoolingParams {
    pub k: f64,
    pub t_env: f64,
}

pub fn newton_cooling(_t: f64, x: &[f64], p: &CoolingParams, out: &mut [f64]) {
    out[0] = -p.k * (x[0] - p.t_env);
}

/// x' = v, v' = mu (1 - x^2) v - x
pub fn van_der_pol(_t: f64, x: &[f64], mu: &f64, out: &mut [f64]) {
    let (pos, vel) = (x[0], x[1]);
    out[0] = vel;
    out[1] = mu * (1.0 - pos * pos) * vel - pos;
}

#[derive(Debug, Clone, Copy)]
pub struct SirParams {
    pub beta: f64,
    pub gamma: f64,
    /// Total population N = S + I + R, fixed by the initial condition.
    pub population: f64,
}

pub fn sir(_t: f64, x: &[f64], p: &SirParams, out: &mut [f64]) {
    let (s, i) = (x[0], x[1]);
    let infection = p.beta * s * i / p.population;
    let recovery = p.gamma * i;
    out[0] = -infection;
    out[1] = infection - recovery;
    out[2] = recovery;
}

/// Series RLC driven by a constant source; state is (I, Q).
#[derive(Debug, Clone, Copy)]
pub struct RlcParams {
    pub r: f64,
    pub l: f64,
    pub c: f64,
    pub v0: f64,
}

pub fn rlc(_t: f64, x: &[f64], p: &RlcParams, out: &mut [f64]) {
    let (current, charge) = (x[0], x[1]);
    out[0] = (p.v0 - p.r * current - charge / p.c) / p.l;
    out[1] = current;
}

#[derive(Debug, Clone, Copy)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

pub fn lorenz(_t: f64, x: &[f64], p: &LorenzParams, out: &mut [f64]) {
    out[0] = p.sigma * (x[1] - x[0]);
    out[1] = x[0] * (p.rho - x[2]) - x[1];
    out[2] = x[0] * x[1] - p.beta * x[2];
}

#[derive(Debug, Clone, Copy)]
pub struct RosslerParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

pub fn rossler(_t: f64, x: &[f64], p: &RosslerParams, out: &mut [f64]) {
    out[0] = -x[1] - x[2];
    out[1] = x[0] + p.a * x[1];
    out[2] = p.b + x[2] * (x[0] - p.c);
}

/// Supercritical Hopf normal form.
#[derive(Debug, Clone, Copy)]
pub struct HopfParams {
    pub mu: f64,
    pub omega: f64,
}

pub fn hopf(_t: f64, x: &[f64], p: &HopfParams, out: &mut [f64]) {
    let r2 = x[0] * x[0] + x[1] * x[1];
    out[0] = p.mu * x[0] - p.omega * x[1] - x[0] * r2;
    out[1] = p.omega * x[0] + p.mu * x[1] - x[1] * r2;
}

/// dN/dt = r N (1 - N / K)
#[derive(Debug, Clone, Copy)]
pub struct LogisticParams {
    pub r: f64,
    pub capacity: f64,
}

pub fn logistic(_t: f64, x: &[f64], p: &LogisticParams, out: &mut [f64]) {
    out[0] = p.r * x[0] * (1.0 - x[0] / p.capacity);
}

/// Planar two-body problem around a fixed central mass; state is
/// (x, y, vx, vy) and `gm` is the gravitational parameter G·M.
pub fn kepler(_t: f64, x: &[f64], gm: &f64, out: &mut [f64]) {
    let r2 = x[0] * x[0] + x[1] * x[1];
    let r3 = r2 * r2.sqrt();
    out[0] = x[2];
    out[1] = x[3];
    out[2] = -gm * x[0] / r3;
    out[3] = -gm * x[1] / r3;
}

/// m x'' + c x' + k x = F0 cos(omega_f t)
#[derive(Debug, Clone, Copy)]
pub struct OscillatorParams {
    pub mass: f64,
    pub damping: f64,
    pub stiffness: f64,
    pub force: f64,
    pub omega_f: f64,
}

pub fn mass_spring_damper(t: f64, x: &[f64], p: &OscillatorParams, out: &mut [f64]) {
    let drive = p.force * (p.omega_f * t).cos();
    out[0] = x[1];
    out[1] = (drive - p.damping * x[1] - p.stiffness * x[0]) / p.mass;
}

/// x_{n+1} = r x_n (1 - x_n)
pub fn verhulst(x: f64, r: f64) -> f64 {
    r * x * (1.0 - x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooling_vanishes_at_ambient() {
        let mut out = [1.0];
        newton_cooling(0.0, &[20.0], &CoolingParams { k: 0.3, t_env: 20.0 }, &mut out);
        assert_eq!(out[0], 0.0);
        newton_cooling(0.0, &[30.0], &CoolingParams { k: 0.5, t_env: 20.0 }, &mut out);
        assert_eq!(out[0], -5.0);
    }

    #[test]
    fn sir_flows_sum_to_zero() {
        let p = SirParams {
            beta: 0.3,
            gamma: 0.1,
            population: 1000.0,
        };
        let mut out = [0.0; 3];
        sir(0.0, &[990.0, 10.0, 0.0], &p, &mut out);
        assert!((out[0] + out[1] + out[2]).abs() < 1e-12);
        assert!(out[0] < 0.0 && out[2] > 0.0);
    }

    #[test]
    fn lorenz_origin_is_fixed() {
        let p = LorenzParams {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        };
        let mut out = [1.0; 3];
        lorenz(0.0, &[0.0; 3], &p, &mut out);
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn hopf_limit_cycle_radius_is_invariant() {
        let p = HopfParams { mu: 0.25, omega: 1.0 };
        let mut out = [0.0; 2];
        // On r = sqrt(mu) the radial velocity x x' + y y' vanishes.
        let x = [0.5, 0.0];
        hopf(0.0, &x, &p, &mut out);
        assert!((x[0] * out[0] + x[1] * out[1]).abs() < 1e-12);
    }

    #[test]
    fn kepler_acceleration_points_inward() {
        let mut out = [0.0; 4];
        kepler(0.0, &[2.0, 0.0, 0.0, 1.0], &4.0, &mut out);
        assert_eq!(out, [0.0, 1.0, -1.0, 0.0]);
    }

    #[test]
    fn forced_oscillator_includes_drive() {
        let p = OscillatorParams {
            mass: 2.0,
            damping: 0.0,
            stiffness: 0.0,
            force: 4.0,
            omega_f: 1.0,
        };
        let mut out = [0.0; 2];
        mass_spring_damper(0.0, &[0.0, 0.0], &p, &mut out);
        assert_eq!(out[1], 2.0);
    }

    #[test]
    fn verhulst_fixed_point() {
        let r = 2.5;
        let fixed = 1.0 - 1.0 / r;
        assert!((verhulst(fixed, r) - fixed).abs() < 1e-15);
    }
}
