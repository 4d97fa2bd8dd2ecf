use crate::autograd::{Graph, NodeId};
use crate::error::ScalarGradError;
use crate::ops::arithmetic::{add_nodes, mul_nodes, pow_node, sub_nodes};
use crate::ops::{resolve, Operand};
use log::debug;
use std::str::FromStr;

/// Specifies the reduction to apply to the squared errors:
/// 'sum' | 'mean'
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Sum,
    Mean,
}

impl FromStr for Reduction {
    type Err = ScalarGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Reduction::Sum),
            "mean" => Ok(Reduction::Mean),
            _ => Err(ScalarGradError::UnsupportedOperation(format!(
                "Unsupported reduction type: {}",
                s
            ))),
        }
    }
}

/// Squared-error loss between targets and predictions.
///
/// The loss is assembled from the operator set, so the returned node is differentiable
/// and its graph reaches every prediction (and every target given as a node).
#[derive(Debug, Clone, Default)]
pub struct MseLoss {
    reduction: Reduction,
}

impl MseLoss {
    pub fn new(reduction: Reduction) -> Self {
        MseLoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Computes `Σ (pred - true)^2`, divided by the number of pairs for `Reduction::Mean`.
    ///
    /// # Errors
    /// * `LengthMismatch` if `y_true` and `y_pred` differ in length. Pairs are never
    ///   silently dropped.
    /// * `UnknownNode` if a node does not belong to `graph`.
    ///
    /// Empty inputs produce a constant `0.0` leaf.
    pub fn calculate<T>(
        &self,
        graph: &Graph,
        y_true: &[T],
        y_pred: &[NodeId],
    ) -> Result<NodeId, ScalarGradError>
    where
        T: Into<Operand> + Copy,
    {
        if y_true.len() != y_pred.len() {
            return Err(ScalarGradError::LengthMismatch {
                expected: y_pred.len(),
                actual: y_true.len(),
                operation: "MseLoss calculate".to_string(),
            });
        }
        for &pred in y_pred {
            graph.check(pred)?;
        }
        for &target in y_true {
            if let Operand::Node(id) = target.into() {
                graph.check(id)?;
            }
        }
        if y_pred.is_empty() {
            debug!("MseLoss: empty inputs, returning a constant zero loss.");
            return Ok(graph.leaf(0.0));
        }

        let squared_error = |target: T, pred: NodeId| -> Result<NodeId, ScalarGradError> {
            let [target] = resolve(graph, [target.into()])?;
            let diff = sub_nodes(graph, pred, target);
            Ok(pow_node(graph, diff, 2.0))
        };
        let mut total = squared_error(y_true[0], y_pred[0])?;
        for (&target, &pred) in y_true[1..].iter().zip(&y_pred[1..]) {
            let squared = squared_error(target, pred)?;
            total = add_nodes(graph, total, squared);
        }

        Ok(match self.reduction {
            Reduction::Sum => total,
            Reduction::Mean => {
                let scale = graph.leaf(1.0 / y_pred.len() as f64);
                mul_nodes(graph, total, scale)
            }
        })
    }
}

/// Summed squared error, `Σ (pred - true)^2`. See [`MseLoss::calculate`].
pub fn mse<T>(graph: &Graph, y_true: &[T], y_pred: &[NodeId]) -> Result<NodeId, ScalarGradError>
where
    T: Into<Operand> + Copy,
{
    MseLoss::new(Reduction::Sum).calculate(graph, y_true, y_pred)
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
