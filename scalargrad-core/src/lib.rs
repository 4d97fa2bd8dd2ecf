//! # scalargrad-core
//!
//! A reverse-mode automatic differentiation engine over scalar values, plus a small
//! multilayer perceptron built on top of it.
//!
//! - [`autograd`]: the arena [`Graph`], node ids, topological sort and backward pass.
//! - [`ops`]: the operator set (`add`, `mul`, `pow`, `neg`, `sub`, `div`, `relu`, `tanh`).
//! - [`Value`]: a graph handle with `+ - * /` overloads.
//! - [`nn`]: MSE loss, neurons, layers and [`Mlp`](nn::Mlp).
//!
//! ```
//! use scalargrad_core::Graph;
//!
//! let graph = Graph::new();
//! let a = graph.leaf(2.0);
//! let b = graph.leaf(-3.0);
//! let c = graph.leaf(10.0);
//! let e = graph.mul(a, b).unwrap();
//! let d = graph.add(e, c).unwrap();
//! let f = graph.leaf(-2.0);
//! let loss = graph.mul(d, f).unwrap();
//! graph.backward(loss).unwrap();
//! assert_eq!(graph.value(loss).unwrap(), -8.0);
//! assert_eq!(graph.grad(a).unwrap(), 6.0);
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod value;

pub use autograd::{Graph, NodeId, Op};
pub use error::ScalarGradError;
pub use ops::Operand;
pub use value::Value;
