//! # Training a small MLP with SGD
//!
//! Fits a 3-4-4-1 tanh MLP to four labelled points:
//! 1.  Parameters are created once as leaves of a single `Graph`.
//! 2.  Each step builds the forward pass and the MSE loss on top of them.
//! 3.  `zero_grad`, `backward` and `Sgd::step` update the parameters in place.
//! 4.  `Graph::truncate` drops the step's nodes so the graph does not grow.
//!
//! ## Running
//! `cargo run --example basic_mlp`
//! (`RUST_LOG=debug` shows per-step optimizer and backward-pass logs.)

use scalargrad_core::nn::{Mlp, Module, MseLoss};
use scalargrad_core::{Graph, ScalarGradError};
use scalargrad_optim::{Optimizer, Sgd, SgdConfig};

fn main() -> Result<(), ScalarGradError> {
    env_logger::init();

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];

    let mut graph = Graph::new();
    let model = Mlp::with_seed(&graph, 3, &[4, 4, 1], 42)?;
    println!("{}", model);
    println!("{} parameters", model.num_parameters());

    let mut optim = Sgd::new(model.parameters(), SgdConfig::default())?;
    let loss_fn = MseLoss::default();
    let mark = graph.len();

    for epoch in 0..100 {
        let mut preds = Vec::with_capacity(xs.len());
        for x in &xs {
            preds.extend(model.forward_values(&graph, x)?);
        }
        let loss = loss_fn.calculate(&graph, &ys, &preds)?;

        optim.zero_grad(&graph)?;
        graph.backward(loss)?;
        optim.step(&graph)?;

        if epoch % 10 == 0 {
            println!("epoch {:3}: loss = {:.6}", epoch, graph.value(loss)?);
        }
        graph.truncate(mark);
    }

    for (x, y) in xs.iter().zip(ys) {
        let out = model.forward_values(&graph, x)?;
        println!("{:?} -> {:+.4} (target {:+})", x, graph.value(out[0])?, y);
    }
    Ok(())
}
