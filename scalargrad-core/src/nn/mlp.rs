use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::nn::layers::Layer;
use crate::nn::module::Module;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Multilayer perceptron: fully connected `tanh` layers applied in sequence.
///
/// `Mlp::new(graph, 3, &[4, 4, 1], rng)` builds layers of sizes 3→4, 4→4 and 4→1.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Creates the network's parameters as leaves of `graph`.
    ///
    /// # Errors
    /// `InvalidArchitecture` if `nin` is zero, `nouts` is empty or contains a zero.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        nin: usize,
        nouts: &[usize],
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        if nouts.is_empty() {
            return Err(ScalarGradError::InvalidArchitecture(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        let mut sizes = Vec::with_capacity(nouts.len() + 1);
        sizes.push(nin);
        sizes.extend_from_slice(nouts);
        // Checked up front so a rejected architecture adds no parameters to `graph`.
        if let Some(pos) = sizes.iter().position(|&n| n == 0) {
            return Err(ScalarGradError::InvalidArchitecture(format!(
                "layer sizes must be non-zero, got {:?} (zero at position {})",
                sizes, pos
            )));
        }

        let layers = sizes
            .windows(2)
            .map(|pair| Layer::new(graph, pair[0], pair[1], rng))
            .collect::<Result<Vec<_>, _>>()?;

        let mlp = Mlp { layers };
        debug!(
            "Mlp: created {:?} with {} parameters",
            sizes,
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    /// Same as [`Mlp::new`] with a `StdRng` seeded from `seed`, for reproducible weights.
    pub fn with_seed(
        graph: &Graph,
        nin: usize,
        nouts: &[usize],
        seed: u64,
    ) -> Result<Self, ScalarGradError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Mlp::new(graph, nin, nouts, &mut rng)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn nin(&self) -> usize {
        self.layers[0].nin()
    }

    pub fn nout(&self) -> usize {
        self.layers[self.layers.len() - 1].nout()
    }

    /// Creates leaves for `input` and runs the forward pass on them.
    pub fn forward_values(
        &self,
        graph: &Graph,
        input: &[f64],
    ) -> Result<Vec<NodeId>, ScalarGradError> {
        let input = graph.leaves(input);
        self.forward(graph, &input)
    }
}

impl Module for Mlp {
    fn forward(&self, graph: &Graph, input: &[NodeId]) -> Result<Vec<NodeId>, ScalarGradError> {
        let mut x = input.to_vec();
        for layer in &self.layers {
            x = layer.forward(graph, &x)?;
        }
        Ok(x)
    }

    fn parameters(&self) -> Vec<NodeId> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }
}

impl fmt::Display for Mlp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<String> = self.layers.iter().map(|l| l.to_string()).collect();
        write!(f, "MLP of [{}]", layers.join(", "))
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
