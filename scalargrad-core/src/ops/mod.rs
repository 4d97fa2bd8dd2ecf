//! # Operator Set (`ops`)
//!
//! Every operator builds one new node in a [`Graph`], wires it to its operands and tags it
//! with the [`Op`](crate::autograd::Op) whose backward rule the backward pass will apply.
//!
//! - **`_op` functions** (`add_op`, `mul_op`, ...) are the checked public entry points. They
//!   accept any [`Operand`]: existing nodes are validated against the graph, numeric
//!   constants are wrapped into fresh leaves.
//! - **`Graph` methods** (`graph.add(a, b)`, ...) forward to the `_op` functions.
//! - **`*_nodes` helpers** are the unchecked crate-internal builders used by the
//!   [`Value`](crate::Value) operator overloads, whose ids are valid by construction.
//!
//! `neg`, `sub` and `div` are compositions of `mul`, `add` and `pow` and have no backward
//! rule of their own.

pub mod activation;
pub mod arithmetic;

pub use activation::{relu_op, tanh_op};
pub use arithmetic::{add_op, div_op, mul_op, neg_op, pow_op, sub_op};

use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::value::Value;

/// An operator argument: either a node of the graph or a plain number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Constant(f64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Constant(value)
    }
}

impl From<Value<'_>> for Operand {
    fn from(value: Value<'_>) -> Self {
        Operand::Node(value.id())
    }
}

/// Validates every node operand first, then wraps the constants, so a rejected call leaves
/// the graph unchanged.
pub(crate) fn resolve<const N: usize>(
    graph: &Graph,
    operands: [Operand; N],
) -> Result<[NodeId; N], ScalarGradError> {
    for operand in &operands {
        if let Operand::Node(id) = operand {
            graph.check(*id)?;
        }
    }
    Ok(operands.map(|operand| match operand {
        Operand::Node(id) => id,
        Operand::Constant(value) => graph.leaf(value),
    }))
}
