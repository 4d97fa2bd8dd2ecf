//! # Autograd
//!
//! Reverse-mode differentiation over scalar nodes stored in an arena ([`Graph`]).
//!
//! - [`node`]: node ids and the [`Op`] tag selecting each node's backward rule.
//! - [`graph`]: the arena, its accessors and the topological sort.
//! - [`backward`]: the backward pass driver ([`Graph::backward`]).
//! - [`grad_check`]: finite-difference verification of analytical gradients.
//!
//! The graph is append-only. Operands are fixed when a node is created and always point to
//! older nodes, so every graph is a DAG and no runtime cycle detection is needed.

pub mod backward;
pub mod grad_check;
pub mod graph;
pub mod node;

pub use grad_check::{check_grad, GradCheckError};
pub use graph::Graph;
pub use node::{NodeId, Op};
