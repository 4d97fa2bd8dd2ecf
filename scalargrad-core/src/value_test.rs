use crate::autograd::{Graph, Op};
use crate::error::ScalarGradError;
use crate::ops::Operand;
use approx::assert_relative_eq;

#[test]
fn test_value_reference_expression() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let a = graph.var(2.0);
    let b = graph.var(-3.0);
    let c = graph.var(10.0);
    let e = a * b;
    let d = e + c;
    let f = graph.var(-2.0);
    let l = d * f;
    l.backward()?;

    assert_eq!(l.data(), -8.0);
    assert_eq!(a.grad(), 6.0);
    assert_eq!(b.grad(), -4.0);
    assert_eq!(c.grad(), -2.0);
    assert_eq!(f.grad(), 4.0);
    Ok(())
}

#[test]
fn test_mixed_scalar_forms_are_commutative() {
    let graph = Graph::new();
    let x = graph.var(4.0);
    assert_eq!((x + 1.0).data(), (1.0 + x).data());
    assert_eq!((x * 3.0).data(), (3.0 * x).data());
    assert_eq!((x - 1.0).data(), 3.0);
    assert_eq!((1.0 - x).data(), -3.0);
    assert_eq!((x / 2.0).data(), 2.0);
    assert_eq!((2.0 / x).data(), 0.5);
    assert_eq!((-x).data(), -4.0);

    let sum = 1.0 + x;
    assert_eq!(graph.op(sum.id()), Ok(Op::Add));
    let product = x * 3.0;
    assert_eq!(graph.op(product.id()), Ok(Op::Mul));
}

#[test]
fn test_value_pow_relu_tanh() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let x = graph.var(-2.0);
    let y = x.pow(2.0) + x.relu() + x.tanh();
    y.backward()?;
    // d/dx = 2x + 0 + (1 - tanh(x)^2)
    let expected = 2.0 * -2.0 + 0.0 + (1.0 - (-2.0_f64).tanh().powi(2));
    assert_relative_eq!(x.grad(), expected, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_value_reuse_accumulates() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let x = graph.var(3.0);
    let y = x * x * x;
    y.backward()?;
    assert_relative_eq!(x.grad(), 27.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_value_display() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let x = graph.var(1.5);
    let y = x * 2.0;
    y.backward()?;
    assert_eq!(x.to_string(), "Value(data=1.5, grad=2)");
    assert_eq!(y.to_string(), "Value(data=3, grad=1)");
    Ok(())
}

#[test]
fn test_value_into_operand() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let x = graph.var(2.0);
    let y = graph.mul(x, 5.0)?;
    assert_eq!(graph.value(y)?, 10.0);
    assert_eq!(Operand::from(x), Operand::Node(x.id()));
    assert!(graph.pow(x, x).is_err());
    Ok(())
}

#[test]
fn test_handle_round_trip() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let id = graph.leaf(3.0);
    let handle = graph.handle(id)?;
    assert_eq!(handle.id(), id);
    assert_eq!(handle.data(), 3.0);
    Ok(())
}

#[test]
#[should_panic(expected = "different graphs")]
fn test_mixing_graphs_panics() {
    let g1 = Graph::new();
    let g2 = Graph::new();
    let a = g1.var(1.0);
    let b = g2.var(2.0);
    let _ = a + b;
}
