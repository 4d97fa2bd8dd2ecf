use std::fmt;

/// Stable handle to a node stored in a [`Graph`](super::graph::Graph) arena.
///
/// A `NodeId` is only meaningful for the graph that created it. Two nodes holding the
/// same value are still distinct ids.
///
/// Besides its position, an id records the graph generation it was created in. Truncating
/// a graph starts a new generation, so an id of a dropped node keeps failing lookups with
/// `UnknownNode` even after its index is reused by a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        NodeId { index, generation }
    }

    /// Position of the node inside its arena.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// The operator that produced a node.
///
/// The backward pass dispatches on this tag to apply the local chain rule; `Leaf`
/// nodes have nothing to propagate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Leaf,
    Add,
    Mul,
    /// Power by a numeric constant.
    Pow { exponent: f64 },
    Relu,
    /// The node's own value caches `tanh(input)` for the backward rule.
    Tanh,
}

impl Op {
    /// Short lowercase name, used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Leaf => "leaf",
            Op::Add => "add",
            Op::Mul => "mul",
            Op::Pow { .. } => "pow",
            Op::Relu => "relu",
            Op::Tanh => "tanh",
        }
    }
}

/// One slot of the arena.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
    /// Generation of the graph when this node was pushed; must match the id's.
    pub(crate) generation: u64,
    /// Fixed at construction. Every operand index is smaller than this node's index.
    pub(crate) operands: Vec<NodeId>,
}

impl Node {
    pub(crate) fn leaf(value: f64, generation: u64) -> Self {
        Node {
            value,
            grad: 0.0,
            op: Op::Leaf,
            generation,
            operands: Vec::new(),
        }
    }
}
