use crate::autograd::graph::Graph;
use crate::autograd::node::NodeId;
use crate::error::ScalarGradError;
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ScalarGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ScalarGradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
}

/// Checks analytical gradients against numerical gradients using central finite differences.
///
/// `func` receives a fresh graph and one leaf per entry of `inputs`, and returns the scalar
/// output node. It is evaluated once with a backward pass to read the analytical gradient of
/// every input, then twice per input at `x ± epsilon` to estimate
/// `(f(x + ε) - f(x - ε)) / 2ε`. The two must agree within `tolerance` (absolute or
/// relative).
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    // --- 1. Analytical gradients ---
    let graph = Graph::new();
    let leaves = graph.leaves(inputs);
    let output = func(&graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    graph
        .backward(output)
        .map_err(GradCheckError::BackwardPassError)?;
    let analytical = leaves
        .iter()
        .map(|&leaf| graph.grad(leaf))
        .collect::<Result<Vec<f64>, _>>()
        .map_err(GradCheckError::BackwardPassError)?;

    // --- 2. Numerical gradients, one input at a time ---
    for (i, &analytical_grad) in analytical.iter().enumerate() {
        let loss_plus = evaluate(&func, inputs, i, epsilon)?;
        let loss_minus = evaluate(&func, inputs, i, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }

        let close = approx::relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = tolerance,
            max_relative = tolerance
        );
        debug!(
            "check_grad: input {} analytical={} numerical={}",
            i, analytical_grad, numerical_grad
        );
        if !close {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}

/// Runs `func` on a new graph with input `index` shifted by `delta`.
fn evaluate<F>(func: &F, inputs: &[f64], index: usize, delta: f64) -> Result<f64, GradCheckError>
where
    F: Fn(&Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    let mut shifted = inputs.to_vec();
    shifted[index] += delta;
    let graph = Graph::new();
    let leaves = graph.leaves(&shifted);
    let output = func(&graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    graph.value(output).map_err(GradCheckError::ForwardPassError)
}
