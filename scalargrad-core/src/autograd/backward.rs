use crate::autograd::graph::{topological_sort, Graph};
use crate::autograd::node::{Node, NodeId, Op};
use crate::error::ScalarGradError;
use log::debug;

impl Graph {
    /// Performs the backward pass starting from `root`.
    ///
    /// Computes the topological order rooted at `root`, seeds d(root)/d(root) = 1 and runs
    /// every node's local chain rule exactly once, in reverse order, so that a node's
    /// gradient is complete before it is distributed to its operands.
    ///
    /// The contributions of one pass are gathered in an adjoint buffer and then added to
    /// the stored gradients of the reached nodes. Gradients are never zeroed implicitly:
    /// calling `backward` twice on the same root doubles every gradient it reaches. The root
    /// is accumulated like any other node: its stored gradient grows by 1 per pass instead of
    /// being overwritten with 1. Use
    /// [`Graph::zero_grad`] between training steps. Nodes not reachable from `root` are left
    /// untouched.
    ///
    /// # Errors
    /// Returns `UnknownNode` if `root` does not belong to this graph.
    pub fn backward(&self, root: NodeId) -> Result<(), ScalarGradError> {
        self.check(root)?;
        let mut nodes = self.nodes_mut();

        let order = topological_sort(&nodes, root);
        debug!(
            "backward: {} of {} nodes reachable from {}",
            order.len(),
            nodes.len(),
            root
        );

        let mut adjoint = vec![0.0_f64; nodes.len()];
        adjoint[root.index()] = 1.0;
        for &id in order.iter().rev() {
            propagate(&nodes, &mut adjoint, id);
        }

        for &id in &order {
            nodes[id.index()].grad += adjoint[id.index()];
        }
        Ok(())
    }
}

/// Local chain rule of one node: adds `d(node)/d(operand) * adjoint[node]` into the adjoint
/// of each operand.
fn propagate(nodes: &[Node], adjoint: &mut [f64], id: NodeId) {
    let node = &nodes[id.index()];
    let out_grad = adjoint[id.index()];

    match node.op {
        Op::Leaf => {}
        Op::Add => {
            for &operand in &node.operands {
                adjoint[operand.index()] += out_grad;
            }
        }
        Op::Mul => {
            let (a, b) = (node.operands[0], node.operands[1]);
            let (a_value, b_value) = (nodes[a.index()].value, nodes[b.index()].value);
            adjoint[a.index()] += b_value * out_grad;
            adjoint[b.index()] += a_value * out_grad;
        }
        Op::Pow { exponent } => {
            let base = node.operands[0];
            let base_value = nodes[base.index()].value;
            adjoint[base.index()] += exponent * base_value.powf(exponent - 1.0) * out_grad;
        }
        Op::Relu => {
            // Gate on the output, not the input.
            let gate = if node.value > 0.0 { 1.0 } else { 0.0 };
            adjoint[node.operands[0].index()] += gate * out_grad;
        }
        Op::Tanh => {
            let t = node.value;
            adjoint[node.operands[0].index()] += (1.0 - t * t) * out_grad;
        }
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
