use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Bound used for weights and biases: parameters start in `[-INIT_BOUND, INIT_BOUND]`.
pub const INIT_BOUND: f64 = 1.0;

/// Creates `count` parameter leaves drawn uniformly from `[low, high]`.
///
/// # Errors
/// `InvalidConfig` if the bounds are not finite or `low > high`.
pub fn uniform<R: Rng + ?Sized>(
    graph: &Graph,
    count: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Vec<NodeId>, ScalarGradError> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(ScalarGradError::InvalidConfig(format!(
            "uniform init requires finite bounds with low <= high, got [{}, {}]",
            low, high
        )));
    }
    let dist = Uniform::new_inclusive(low, high);
    Ok((0..count)
        .map(|_| graph.leaf(dist.sample(rng)))
        .collect())
}

/// Creates `count` leaves in `[-INIT_BOUND, INIT_BOUND]`.
pub fn uniform_symmetric<R: Rng + ?Sized>(
    graph: &Graph,
    count: usize,
    rng: &mut R,
) -> Result<Vec<NodeId>, ScalarGradError> {
    uniform(graph, count, -INIT_BOUND, INIT_BOUND, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
