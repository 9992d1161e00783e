/// A continuous dynamical system dx/dt = f(t, x).
pub trait DynamicalSystem {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field.
    /// t: current time
    /// x: current state
    /// out: buffer to write dx/dt
    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]);
}

/// Signature shared by every model function in [`crate::models`].
pub type Rhs<P> = fn(t: f64, x: &[f64], params: &P, out: &mut [f64]);

/// Binds a model function to its parameter block so the solver can treat it
/// as a [`DynamicalSystem`].
pub struct VectorField<P> {
    dim: usize,
    params: P,
    rhs: Rhs<P>,
}

impl<P> VectorField<P> {
    pub fn new(dim: usize, params: P, rhs: Rhs<P>) -> Self {
        Self { dim, params, rhs }
    }

    pub fn params(&self) -> &P {
        &self.params
    }
}

impl<P> DynamicalSystem for VectorField<P> {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]) {
        (self.rhs)(t, x, &self.params, out);
    }
}
