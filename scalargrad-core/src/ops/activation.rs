use crate::autograd::{Graph, NodeId, Op};
use crate::error::ScalarGradError;
use crate::ops::{resolve, Operand};

/// Rectified Linear Unit: `max(0, a)`.
///
/// Backward passes the output gradient through when the output is strictly positive and
/// blocks it otherwise.
pub fn relu_op(graph: &Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    let [a] = resolve(graph, [a.into()])?;
    Ok(relu_node(graph, a))
}

/// Hyperbolic tangent computed as `(e^2a - 1) / (e^2a + 1)`.
///
/// The result is stored as the node's value and reused by the backward rule
/// `(1 - tanh^2) * grad`. Inputs large enough for `e^2a` to overflow yield NaN.
pub fn tanh_op(graph: &Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    let [a] = resolve(graph, [a.into()])?;
    Ok(tanh_node(graph, a))
}

pub(crate) fn relu_node(graph: &Graph, a: NodeId) -> NodeId {
    let value = graph.value_of(a).max(0.0);
    graph.push(value, Op::Relu, vec![a])
}

pub(crate) fn tanh_node(graph: &Graph, a: NodeId) -> NodeId {
    let e2x = (2.0 * graph.value_of(a)).exp();
    let value = (e2x - 1.0) / (e2x + 1.0);
    graph.push(value, Op::Tanh, vec![a])
}

impl Graph {
    /// See [`relu_op`].
    pub fn relu(&self, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
        relu_op(self, a)
    }

    /// See [`tanh_op`].
    pub fn tanh(&self, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
        tanh_op(self, a)
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
