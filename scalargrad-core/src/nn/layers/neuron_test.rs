use super::*;
use crate::autograd::Op;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn neuron(graph: &Graph, nin: usize) -> Neuron {
    let mut rng = StdRng::seed_from_u64(42);
    Neuron::new(graph, nin, &mut rng).expect("Test neuron creation failed")
}

#[test]
fn test_neuron_forward_is_tanh_of_affine() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let n = neuron(&graph, 3);
    let x = [0.5, -1.0, 2.0];
    let inputs = graph.leaves(&x);

    let out = n.activate(&graph, &inputs)?;

    let mut act = graph.value(n.bias())?;
    for (&w, xi) in n.weights().iter().zip(x) {
        act += graph.value(w)? * xi;
    }
    assert_relative_eq!(graph.value(out)?, act.tanh(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_neuron_gradients() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let n = neuron(&graph, 2);
    let x = [0.3, -0.7];
    let inputs = graph.leaves(&x);
    let out = n.activate(&graph, &inputs)?;
    graph.backward(out)?;

    let t = graph.value(out)?;
    let local = 1.0 - t * t;
    assert_relative_eq!(graph.grad(n.bias())?, local, epsilon = 1e-12);
    for (&w, xi) in n.weights().iter().zip(x) {
        assert_relative_eq!(graph.grad(w)?, local * xi, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_neuron_parameters_order() {
    let graph = Graph::new();
    let n = neuron(&graph, 4);
    let params = n.parameters();
    assert_eq!(params.len(), 5);
    assert_eq!(&params[..4], n.weights());
    assert_eq!(params[4], n.bias());
    assert_eq!(n.to_string(), "Neuron(4)");
}

#[test]
fn test_neuron_rejects_wrong_input_length() {
    let graph = Graph::new();
    let n = neuron(&graph, 3);
    let inputs = graph.leaves(&[1.0, 2.0]);
    assert_eq!(
        n.activate(&graph, &inputs),
        Err(ScalarGradError::LengthMismatch {
            expected: 3,
            actual: 2,
            operation: "Neuron forward".to_string(),
        })
    );
}

#[test]
fn test_neuron_requires_inputs() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        Neuron::new(&graph, 0, &mut rng),
        Err(ScalarGradError::InvalidArchitecture(_))
    ));
}

#[test]
fn test_neuron_sum_starts_from_bias() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let n = neuron(&graph, 3);
    let inputs = graph.leaves(&[1.0, 2.0, 3.0]);
    let before = graph.len();
    let out = n.activate(&graph, &inputs)?;

    // One mul and one add per weight, then tanh.
    assert_eq!(graph.len() - before, 2 * 3 + 1);
    assert_eq!(graph.op(out)?, Op::Tanh);

    // Walk the add chain down to its first operand: the bias.
    let mut acc = graph.operands(out)?[0];
    while graph.op(acc)? == Op::Add {
        acc = graph.operands(acc)?[0];
    }
    assert_eq!(acc, n.bias());
    Ok(())
}
