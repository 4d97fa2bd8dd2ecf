use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::nn::init::uniform_symmetric;
use crate::nn::module::Module;
use crate::ops::activation::tanh_node;
use crate::ops::arithmetic::{add_nodes, mul_nodes};
use rand::Rng;
use std::fmt;

/// A single unit: `tanh(w · x + b)`.
///
/// One weight per input plus one bias, all initialised uniformly in `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<NodeId>,
    bias: NodeId,
}

impl Neuron {
    /// Creates a neuron with `nin` inputs.
    ///
    /// # Errors
    /// `InvalidArchitecture` if `nin` is zero.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        nin: usize,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        if nin == 0 {
            return Err(ScalarGradError::InvalidArchitecture(
                "a neuron needs at least one input".to_string(),
            ));
        }
        let weights = uniform_symmetric(graph, nin, rng)?;
        let bias = uniform_symmetric(graph, 1, rng)?[0];
        Ok(Neuron { weights, bias })
    }

    pub fn nin(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[NodeId] {
        &self.weights
    }

    pub fn bias(&self) -> NodeId {
        self.bias
    }

    /// Output node of this neuron for `input`.
    pub fn activate(&self, graph: &Graph, input: &[NodeId]) -> Result<NodeId, ScalarGradError> {
        if input.len() != self.weights.len() {
            return Err(ScalarGradError::LengthMismatch {
                expected: self.weights.len(),
                actual: input.len(),
                operation: "Neuron forward".to_string(),
            });
        }
        for &id in input.iter().chain(&self.weights).chain(Some(&self.bias)) {
            graph.check(id)?;
        }

        // b + Σ w·x, accumulated left to right starting from the bias.
        let act = self
            .weights
            .iter()
            .zip(input)
            .fold(self.bias, |acc, (&w, &x)| {
                let term = mul_nodes(graph, w, x);
                add_nodes(graph, acc, term)
            });
        Ok(tanh_node(graph, act))
    }
}

impl Module for Neuron {
    fn forward(&self, graph: &Graph, input: &[NodeId]) -> Result<Vec<NodeId>, ScalarGradError> {
        Ok(vec![self.activate(graph, input)?])
    }

    /// Weights first, then the bias.
    fn parameters(&self) -> Vec<NodeId> {
        let mut params = self.weights.clone();
        params.push(self.bias);
        params
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neuron({})", self.weights.len())
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
