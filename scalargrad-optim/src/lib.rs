//! Optimizers that update the parameter leaves of a `scalargrad_core::Graph` from their
//! accumulated gradients.

use scalargrad_core::{Graph, NodeId, ScalarGradError};

pub mod sgd;

pub use sgd::{Sgd, SgdConfig};

/// Trait for optimization algorithms.
/// Optimizers update the parameters of a model based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step (parameter update).
    ///
    /// Reads the gradient of every managed parameter and writes the new value back through
    /// `Graph::set_value`, so every parameter must be a leaf of `graph`.
    fn step(&mut self, graph: &Graph) -> Result<(), ScalarGradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    /// Should be called before the backward pass, since gradients accumulate across passes.
    fn zero_grad(&self, graph: &Graph) -> Result<(), ScalarGradError> {
        graph.zero_grad(self.params())
    }

    /// The parameters this optimizer updates, in the order it was given them.
    fn params(&self) -> &[NodeId];
}
