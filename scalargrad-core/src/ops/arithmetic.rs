use crate::autograd::{Graph, NodeId, Op};
use crate::error::ScalarGradError;
use crate::ops::{resolve, Operand};

// --- Forward Operations ---

/// `a + b`. Backward: both operands receive the output gradient.
pub fn add_op(
    graph: &Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let [a, b] = resolve(graph, [a.into(), b.into()])?;
    Ok(add_nodes(graph, a, b))
}

/// `a * b`. Backward: each operand receives the other's value times the output gradient.
pub fn mul_op(
    graph: &Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let [a, b] = resolve(graph, [a.into(), b.into()])?;
    Ok(mul_nodes(graph, a, b))
}

/// `base ^ exponent` for a numeric constant `exponent`.
///
/// Backward: `exponent * base^(exponent - 1)` times the output gradient.
///
/// # Errors
/// `InvalidExponent` when `exponent` is a graph node: node-valued exponents are not
/// differentiated, and the call is rejected rather than reading the node's current value.
pub fn pow_op(
    graph: &Graph,
    base: impl Into<Operand>,
    exponent: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let exponent = match exponent.into() {
        Operand::Constant(value) => value,
        Operand::Node(_) => return Err(ScalarGradError::InvalidExponent),
    };
    let [base] = resolve(graph, [base.into()])?;
    Ok(pow_node(graph, base, exponent))
}

/// `-a`, built as `a * -1`.
pub fn neg_op(graph: &Graph, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
    let [a] = resolve(graph, [a.into()])?;
    Ok(neg_node(graph, a))
}

/// `a - b`, built as `a + (-b)`.
pub fn sub_op(
    graph: &Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let [a, b] = resolve(graph, [a.into(), b.into()])?;
    Ok(sub_nodes(graph, a, b))
}

/// `a / b`, built as `a * b^-1`.
pub fn div_op(
    graph: &Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let [a, b] = resolve(graph, [a.into(), b.into()])?;
    Ok(div_nodes(graph, a, b))
}

// --- Unchecked builders (operands already belong to `graph`) ---

pub(crate) fn add_nodes(graph: &Graph, a: NodeId, b: NodeId) -> NodeId {
    let value = graph.value_of(a) + graph.value_of(b);
    graph.push(value, Op::Add, vec![a, b])
}

pub(crate) fn mul_nodes(graph: &Graph, a: NodeId, b: NodeId) -> NodeId {
    let value = graph.value_of(a) * graph.value_of(b);
    graph.push(value, Op::Mul, vec![a, b])
}

pub(crate) fn pow_node(graph: &Graph, base: NodeId, exponent: f64) -> NodeId {
    let value = graph.value_of(base).powf(exponent);
    graph.push(value, Op::Pow { exponent }, vec![base])
}

pub(crate) fn neg_node(graph: &Graph, a: NodeId) -> NodeId {
    let minus_one = graph.leaf(-1.0);
    mul_nodes(graph, a, minus_one)
}

pub(crate) fn sub_nodes(graph: &Graph, a: NodeId, b: NodeId) -> NodeId {
    let neg_b = neg_node(graph, b);
    add_nodes(graph, a, neg_b)
}

pub(crate) fn div_nodes(graph: &Graph, a: NodeId, b: NodeId) -> NodeId {
    let inv_b = pow_node(graph, b, -1.0);
    mul_nodes(graph, a, inv_b)
}

// --- Graph methods ---

impl Graph {
    /// See [`add_op`].
    pub fn add(
        &self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        add_op(self, a, b)
    }

    /// See [`mul_op`].
    pub fn mul(
        &self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        mul_op(self, a, b)
    }

    /// See [`pow_op`].
    pub fn pow(
        &self,
        base: impl Into<Operand>,
        exponent: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        pow_op(self, base, exponent)
    }

    /// See [`neg_op`].
    pub fn neg(&self, a: impl Into<Operand>) -> Result<NodeId, ScalarGradError> {
        neg_op(self, a)
    }

    /// See [`sub_op`].
    pub fn sub(
        &self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        sub_op(self, a, b)
    }

    /// See [`div_op`].
    pub fn div(
        &self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        div_op(self, a, b)
    }
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
