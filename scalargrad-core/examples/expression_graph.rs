//! # Building and differentiating an expression
//!
//! Builds `L = (a * b + c) * f` twice: once through the checked `Graph` API and once with
//! `Value` operator overloading, then prints values, gradients and the topological order.
//!
//! Run with `RUST_LOG=scalargrad_core=debug cargo run --example expression_graph`.

use scalargrad_core::{Graph, ScalarGradError};

fn main() -> Result<(), ScalarGradError> {
    env_logger::init();

    // --- Graph API ---
    let graph = Graph::new();
    let a = graph.leaf(2.0);
    let b = graph.leaf(-3.0);
    let c = graph.leaf(10.0);
    let e = graph.mul(a, b)?;
    let d = graph.add(e, c)?;
    let f = graph.leaf(-2.0);
    let l = graph.mul(d, f)?;
    graph.backward(l)?;

    println!("L = {}", graph.value(l)?);
    for (name, id) in [("a", a), ("b", b), ("c", c), ("f", f)] {
        println!("dL/d{} = {}", name, graph.grad(id)?);
    }
    let order = graph.topological_order(l)?;
    let ops: Vec<String> = order
        .iter()
        .map(|&id| graph.op(id).map(|op| format!("{}:{}", id, op.name())))
        .collect::<Result<_, _>>()?;
    println!("topological order: {}", ops.join(" -> "));

    // --- Value handles ---
    let graph = Graph::new();
    let x = graph.var(-4.0);
    let z = 2.0 * x + 2.0 + x;
    let q = z.relu() + z * x;
    let h = (z * z).relu();
    let y = h + q + q * x;
    y.backward()?;
    println!("y = {}", y);
    println!("x = {}", x);
    println!("graph holds {} nodes", graph.len());

    Ok(())
}
