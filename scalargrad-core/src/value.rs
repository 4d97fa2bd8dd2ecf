//! Operator-overloading handle over graph nodes.
//!
//! ```
//! use scalargrad_core::Graph;
//!
//! let graph = Graph::new();
//! let x = graph.var(3.0);
//! let y = x * x + 2.0 * x - 1.0;
//! y.backward().unwrap();
//! assert_eq!(y.data(), 14.0);
//! assert_eq!(x.grad(), 8.0);
//! ```

use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::ops::activation::{relu_node, tanh_node};
use crate::ops::arithmetic::{add_nodes, div_nodes, mul_nodes, neg_node, pow_node, sub_nodes};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::ptr;

/// A node of a [`Graph`] together with the graph it lives in.
///
/// `Value` is `Copy`; combining values with `+ - * /` (or with plain `f64`s on either side)
/// appends new nodes to the shared graph. Mixing values of two different graphs panics.
///
/// A `Value` borrows its graph, so [`Graph::truncate`] cannot run while one is alive and the
/// node it names always exists.
#[derive(Clone, Copy)]
pub struct Value<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Value<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Value { graph, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Forward value.
    pub fn data(&self) -> f64 {
        self.graph.value_of(self.id)
    }

    /// Accumulated gradient.
    pub fn grad(&self) -> f64 {
        self.graph.grad_of(self.id)
    }

    /// Runs [`Graph::backward`] from this node.
    pub fn backward(&self) -> Result<(), ScalarGradError> {
        self.graph.backward(self.id)
    }

    /// `self ^ exponent` for a numeric exponent.
    pub fn pow(self, exponent: f64) -> Value<'g> {
        self.derive(pow_node(self.graph, self.id, exponent))
    }

    pub fn relu(self) -> Value<'g> {
        self.derive(relu_node(self.graph, self.id))
    }

    pub fn tanh(self) -> Value<'g> {
        self.derive(tanh_node(self.graph, self.id))
    }

    fn derive(&self, id: NodeId) -> Value<'g> {
        Value::new(self.graph, id)
    }

    fn constant(&self, value: f64) -> NodeId {
        self.graph.leaf(value)
    }

    fn same_graph(&self, other: &Value<'g>) {
        assert!(
            ptr::eq(self.graph, other.graph),
            "Values from different graphs cannot be combined ({} and {}).",
            self.id,
            other.id
        );
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value(data={}, grad={})", self.data(), self.grad())
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("id", &self.id)
            .field("data", &self.data())
            .field("grad", &self.grad())
            .finish()
    }
}

// Value (op) Value, Value (op) f64 and f64 (op) Value all resolve to the same builder.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $builder:ident) => {
        impl<'g> $trait<Value<'g>> for Value<'g> {
            type Output = Value<'g>;

            fn $method(self, rhs: Value<'g>) -> Value<'g> {
                self.same_graph(&rhs);
                self.derive($builder(self.graph, self.id, rhs.id))
            }
        }

        impl<'g> $trait<f64> for Value<'g> {
            type Output = Value<'g>;

            fn $method(self, rhs: f64) -> Value<'g> {
                let rhs = self.constant(rhs);
                self.derive($builder(self.graph, self.id, rhs))
            }
        }

        impl<'g> $trait<Value<'g>> for f64 {
            type Output = Value<'g>;

            fn $method(self, rhs: Value<'g>) -> Value<'g> {
                let lhs = rhs.constant(self);
                rhs.derive($builder(rhs.graph, lhs, rhs.id))
            }
        }
    };
}

impl_binary_op!(Add, add, add_nodes);
impl_binary_op!(Sub, sub, sub_nodes);
impl_binary_op!(Mul, mul, mul_nodes);
impl_binary_op!(Div, div, div_nodes);

impl<'g> Neg for Value<'g> {
    type Output = Value<'g>;

    fn neg(self) -> Value<'g> {
        self.derive(neg_node(self.graph, self.id))
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
