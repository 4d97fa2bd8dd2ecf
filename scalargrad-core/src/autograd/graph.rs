use crate::autograd::node::{Node, NodeId, Op};
use crate::error::ScalarGradError;
use crate::value::Value;
use log::{debug, trace, warn};
use std::cell::{Ref, RefCell, RefMut};

/// Arena holding every node of a computation graph.
///
/// Nodes are appended by the operators in [`crate::ops`] and addressed by [`NodeId`].
/// Because an operator can only reference nodes that already exist, operand indices are
/// always smaller than the index of the node using them and the graph is acyclic by
/// construction.
///
/// Interior mutability (`RefCell`) lets several [`Value`] handles share one graph while
/// operators append to it and the backward pass accumulates gradients. The graph is
/// single-threaded; it is neither `Send`-shared nor `Sync`.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: RefCell<Vec<Node>>,
    // Bumped by every truncation that drops nodes.
    generation: u64,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Graph {
            nodes: RefCell::new(Vec::new()),
            generation: 0,
        }
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Creates a leaf node (an input or a parameter) with a zero gradient.
    pub fn leaf(&self, value: f64) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len(), self.generation);
        nodes.push(Node::leaf(value, self.generation));
        id
    }

    /// Creates one leaf per value, in order.
    pub fn leaves(&self, values: &[f64]) -> Vec<NodeId> {
        values.iter().map(|&v| self.leaf(v)).collect()
    }

    /// Creates a leaf and returns an operator-overloading handle to it.
    pub fn var(&self, value: f64) -> Value<'_> {
        Value::new(self, self.leaf(value))
    }

    /// Wraps an existing node into a [`Value`] handle.
    pub fn handle(&self, id: NodeId) -> Result<Value<'_>, ScalarGradError> {
        self.check(id)?;
        Ok(Value::new(self, id))
    }

    /// Forward value of `id`.
    pub fn value(&self, id: NodeId) -> Result<f64, ScalarGradError> {
        self.check(id)?;
        Ok(self.value_of(id))
    }

    /// Accumulated gradient of `id` (zero until a backward pass reaches it).
    pub fn grad(&self, id: NodeId) -> Result<f64, ScalarGradError> {
        self.check(id)?;
        Ok(self.grad_of(id))
    }

    /// Operator that produced `id`.
    pub fn op(&self, id: NodeId) -> Result<Op, ScalarGradError> {
        self.check(id)?;
        Ok(self.nodes.borrow()[id.index].op)
    }

    /// Operands `id` was derived from, in construction order. Empty for leaves.
    pub fn operands(&self, id: NodeId) -> Result<Vec<NodeId>, ScalarGradError> {
        self.check(id)?;
        Ok(self.nodes.borrow()[id.index].operands.clone())
    }

    /// Overwrites the value of a leaf, e.g. for a parameter update.
    ///
    /// Nodes derived by an operator keep the value they were built with and are rejected
    /// with [`ScalarGradError::NotALeaf`].
    pub fn set_value(&self, id: NodeId, value: f64) -> Result<(), ScalarGradError> {
        self.check(id)?;
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[id.index];
        if node.op != Op::Leaf {
            return Err(ScalarGradError::NotALeaf { index: id.index });
        }
        node.value = value;
        Ok(())
    }

    /// Resets the gradient of every node in `ids` to zero.
    ///
    /// All ids are validated before anything is modified.
    pub fn zero_grad(&self, ids: &[NodeId]) -> Result<(), ScalarGradError> {
        for &id in ids {
            self.check(id)?;
        }
        let mut nodes = self.nodes.borrow_mut();
        for &id in ids {
            nodes[id.index].grad = 0.0;
        }
        Ok(())
    }

    /// Resets the gradient of every node in the graph.
    pub fn zero_grad_all(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    /// Drops every node with an index `>= len`.
    ///
    /// Training loops record `len()` once the parameters exist and truncate back to it after
    /// each step, so the next forward pass starts from a graph holding only the parameters.
    ///
    /// Taking `&mut self` means no [`Value`] handle can be alive across the call. Plain
    /// [`NodeId`]s of dropped nodes stay rejected with `UnknownNode` afterwards, even once
    /// their indices are handed out again; ids of kept nodes remain valid.
    ///
    /// ```compile_fail
    /// use scalargrad_core::Graph;
    ///
    /// let mut graph = Graph::new();
    /// let w = graph.var(1.0);
    /// let mark = graph.len();
    /// let y = w * 2.0;
    /// graph.truncate(mark); // `y` still borrows `graph`
    /// println!("{}", y.data());
    /// ```
    pub fn truncate(&mut self, len: usize) {
        let nodes = self.nodes.get_mut();
        if len > nodes.len() {
            warn!(
                "Graph::truncate({}) called on a graph of {} nodes; nothing to drop.",
                len,
                nodes.len()
            );
            return;
        }
        if len == nodes.len() {
            return;
        }
        debug!("Graph: dropping {} nodes ({} kept).", nodes.len() - len, len);
        nodes.truncate(len);
        self.generation += 1;
    }

    /// Every node reachable from `root` (itself included), each exactly once and after all
    /// of its operands.
    pub fn topological_order(&self, root: NodeId) -> Result<Vec<NodeId>, ScalarGradError> {
        self.check(root)?;
        Ok(topological_sort(&self.nodes.borrow(), root))
    }

    // --- crate-internal access ---

    pub(crate) fn check(&self, id: NodeId) -> Result<NodeId, ScalarGradError> {
        let nodes = self.nodes.borrow();
        match nodes.get(id.index) {
            Some(node) if node.generation == id.generation => Ok(id),
            _ => Err(ScalarGradError::UnknownNode {
                index: id.index,
                len: nodes.len(),
            }),
        }
    }

    /// Appends an operator output. Callers guarantee the operands belong to this graph.
    pub(crate) fn push(&self, value: f64, op: Op, operands: Vec<NodeId>) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len(), self.generation);
        debug_assert!(operands.iter().all(|o| o.index < id.index));
        nodes.push(Node {
            value,
            grad: 0.0,
            op,
            generation: self.generation,
            operands,
        });
        id
    }

    pub(crate) fn value_of(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.index].value
    }

    pub(crate) fn grad_of(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.index].grad
    }

    pub(crate) fn nodes(&self) -> Ref<'_, Vec<Node>> {
        self.nodes.borrow()
    }

    pub(crate) fn nodes_mut(&self) -> RefMut<'_, Vec<Node>> {
        self.nodes.borrow_mut()
    }
}

/// Depth-first post-order over the operand edges starting at `root`.
///
/// A node is marked visited when first entered and appended once all of its operands have
/// been appended. The traversal keeps an explicit stack of `(node, next operand)` frames,
/// so long chains such as a neuron's running sum cannot overflow the call stack.
pub(crate) fn topological_sort(nodes: &[Node], root: NodeId) -> Vec<NodeId> {
    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    visited[root.index] = true;

    while let Some(frame) = stack.last_mut() {
        let (id, next) = *frame;
        match nodes[id.index].operands.get(next) {
            Some(&child) => {
                frame.1 += 1;
                // The arena only lets a node reference older nodes.
                debug_assert!(child.index < id.index, "operand {} is not older than {}", child, id);
                if !visited[child.index] {
                    visited[child.index] = true;
                    stack.push((child, 0));
                }
            }
            None => {
                trace!("[topological_sort] appending {} ({})", id, nodes[id.index].op.name());
                order.push(id);
                stack.pop();
            }
        }
    }
    order
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
