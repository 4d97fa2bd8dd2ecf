use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;

/// The base trait for the neural network building blocks (neuron, layer, MLP).
///
/// Parameters are leaf nodes of the graph the module was created in. Each forward pass
/// appends new nodes on top of them.
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass of the module on `input` nodes of `graph`.
    ///
    /// # Errors
    /// `LengthMismatch` if `input` does not match the module's fan-in, `UnknownNode` if an
    /// input does not belong to `graph`.
    fn forward(&self, graph: &Graph, input: &[NodeId]) -> Result<Vec<NodeId>, ScalarGradError>;

    /// All learnable parameters, flattened in a stable order.
    fn parameters(&self) -> Vec<NodeId>;

    /// Resets the gradient of every parameter. Call before each backward pass of a
    /// training step, since gradients accumulate across passes.
    fn zero_grad(&self, graph: &Graph) -> Result<(), ScalarGradError> {
        graph.zero_grad(&self.parameters())
    }

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }
}
