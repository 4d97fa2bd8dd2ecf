use crate::Optimizer;
use scalargrad_core::{Graph, NodeId, Op, ScalarGradError};

/// Hyperparameters of [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub learning_rate: f64,
    /// Momentum factor in `[0, 1)`. `0.0` disables the momentum buffer.
    pub momentum: f64,
    /// L2 penalty added to each gradient as `weight_decay * p`.
    pub weight_decay: f64,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            learning_rate: 0.05,
            momentum: 0.0,
            weight_decay: 0.0,
        }
    }
}

impl SgdConfig {
    pub fn with_learning_rate(learning_rate: f64) -> Self {
        SgdConfig {
            learning_rate,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScalarGradError> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(ScalarGradError::InvalidConfig(format!(
                "learning rate must be finite and non-negative, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(ScalarGradError::InvalidConfig(format!(
                "momentum must be in [0, 1), got {}",
                self.momentum
            )));
        }
        if !self.weight_decay.is_finite() || self.weight_decay < 0.0 {
            return Err(ScalarGradError::InvalidConfig(format!(
                "weight decay must be finite and non-negative, got {}",
                self.weight_decay
            )));
        }
        Ok(())
    }
}

/// Implements stochastic gradient descent (optionally with momentum and weight decay).
///
/// Updates parameters `p` according to the rule:
/// `p = p - lr * (grad(p) + weight_decay * p)`
///
/// With `momentum > 0` a velocity `v = momentum * v + g` is kept per parameter and
/// `p = p - lr * v` is applied instead.
#[derive(Debug)]
pub struct Sgd {
    params: Vec<NodeId>,
    config: SgdConfig,
    // One slot per parameter, empty until the first step with momentum.
    velocity: Vec<f64>,
}

impl Sgd {
    /// Creates a new SGD optimizer over `params`.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(params: Vec<NodeId>, config: SgdConfig) -> Result<Self, ScalarGradError> {
        config.validate()?;
        log::debug!(
            "Sgd over {} parameters: lr={}, momentum={}, weight_decay={}",
            params.len(),
            config.learning_rate,
            config.momentum,
            config.weight_decay
        );
        Ok(Sgd {
            params,
            config,
            velocity: Vec::new(),
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    /// Changes the learning rate for subsequent steps, e.g. for a decay schedule.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), ScalarGradError> {
        let config = SgdConfig {
            learning_rate,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, graph: &Graph) -> Result<(), ScalarGradError> {
        let SgdConfig {
            learning_rate,
            momentum,
            weight_decay,
        } = self.config;

        // Read everything first so a bad id leaves every parameter untouched.
        let mut updates = Vec::with_capacity(self.params.len());
        for &p in &self.params {
            if graph.op(p)? != Op::Leaf {
                return Err(ScalarGradError::NotALeaf { index: p.index() });
            }
            let value = graph.value(p)?;
            let grad = graph.grad(p)? + weight_decay * value;
            updates.push((p, value, grad));
        }

        if momentum > 0.0 && self.velocity.len() != self.params.len() {
            self.velocity = vec![0.0; self.params.len()];
        }

        let mut grad_norm_sq = 0.0;
        for (i, (p, value, grad)) in updates.into_iter().enumerate() {
            grad_norm_sq += grad * grad;
            let direction = if momentum > 0.0 {
                self.velocity[i] = momentum * self.velocity[i] + grad;
                self.velocity[i]
            } else {
                grad
            };
            graph.set_value(p, value - learning_rate * direction)?;
        }
        log::debug!(
            "Sgd step: {} parameters, grad norm {:.6}",
            self.params.len(),
            grad_norm_sq.sqrt()
        );
        Ok(())
    }

    fn params(&self) -> &[NodeId] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quadratic_loss(graph: &Graph, p: NodeId) -> NodeId {
        // (p - 3)^2, minimum at p = 3
        let shifted = graph.sub(p, 3.0).unwrap();
        graph.pow(shifted, 2.0).unwrap()
    }

    #[test]
    fn test_sgd_default_config() {
        let config = SgdConfig::default();
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.momentum, 0.0);
        assert_eq!(config.weight_decay, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sgd_rejects_invalid_config() {
        for config in [
            SgdConfig::with_learning_rate(-0.1),
            SgdConfig::with_learning_rate(f64::NAN),
            SgdConfig {
                momentum: 1.0,
                ..SgdConfig::default()
            },
            SgdConfig {
                weight_decay: -1.0,
                ..SgdConfig::default()
            },
        ] {
            assert!(matches!(
                Sgd::new(vec![], config),
                Err(ScalarGradError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_sgd_step() {
        let graph = Graph::new();
        let p1 = graph.leaf(1.0);
        let p2 = graph.leaf(2.0);
        let p3 = graph.leaf(5.0); // No gradient

        // loss = 10 * p1 - 20 * p2
        let a = graph.mul(p1, 10.0).unwrap();
        let b = graph.mul(p2, -20.0).unwrap();
        let loss = graph.add(a, b).unwrap();
        graph.backward(loss).unwrap();

        let mut optim = Sgd::new(vec![p1, p2, p3], SgdConfig::with_learning_rate(0.1)).unwrap();
        optim.step(&graph).unwrap();

        assert_relative_eq!(graph.value(p1).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(graph.value(p2).unwrap(), 4.0, epsilon = 1e-12);
        assert_eq!(graph.value(p3).unwrap(), 5.0);
    }

    #[test]
    fn test_sgd_zero_grad() {
        let graph = Graph::new();
        let p1 = graph.leaf(1.0);
        let p2 = graph.leaf(2.0);
        let loss = graph.mul(p1, p2).unwrap();
        graph.backward(loss).unwrap();
        assert_eq!(graph.grad(p1).unwrap(), 2.0);

        let optim = Sgd::new(vec![p1, p2], SgdConfig::default()).unwrap();
        optim.zero_grad(&graph).unwrap();

        assert_eq!(graph.grad(p1).unwrap(), 0.0);
        assert_eq!(graph.grad(p2).unwrap(), 0.0);
        // The product node is not managed by the optimizer.
        assert_eq!(graph.grad(loss).unwrap(), 1.0);
    }

    #[test]
    fn test_sgd_weight_decay() {
        let graph = Graph::new();
        let p = graph.leaf(2.0);
        let config = SgdConfig {
            learning_rate: 0.5,
            weight_decay: 0.1,
            ..SgdConfig::default()
        };
        let mut optim = Sgd::new(vec![p], config).unwrap();
        // No backward pass: gradient is zero, only the decay term moves p.
        optim.step(&graph).unwrap();
        assert_relative_eq!(graph.value(p).unwrap(), 2.0 - 0.5 * 0.1 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sgd_momentum_accumulates_velocity() {
        let mut graph = Graph::new();
        let p = graph.leaf(0.0);
        let config = SgdConfig {
            learning_rate: 1.0,
            momentum: 0.5,
            ..SgdConfig::default()
        };
        let mut optim = Sgd::new(vec![p], config).unwrap();
        let mark = graph.len();

        // Constant gradient of 1: v = 1, then v = 1.5.
        for _ in 0..2 {
            optim.zero_grad(&graph).unwrap();
            let loss = graph.mul(p, 1.0).unwrap();
            graph.backward(loss).unwrap();
            optim.step(&graph).unwrap();
            graph.truncate(mark);
        }
        assert_relative_eq!(graph.value(p).unwrap(), -2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sgd_converges_on_quadratic() {
        let mut graph = Graph::new();
        let p = graph.leaf(-1.0);
        let mark = graph.len();
        let mut optim = Sgd::new(vec![p], SgdConfig::with_learning_rate(0.1)).unwrap();

        for _ in 0..200 {
            optim.zero_grad(&graph).unwrap();
            let loss = quadratic_loss(&graph, p);
            graph.backward(loss).unwrap();
            optim.step(&graph).unwrap();
            graph.truncate(mark);
        }
        assert_relative_eq!(graph.value(p).unwrap(), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sgd_step_rejects_non_leaf_without_partial_update() {
        let graph = Graph::new();
        let p = graph.leaf(1.0);
        let q = graph.leaf(2.0);
        let sum = graph.add(p, q).unwrap();
        graph.backward(sum).unwrap();

        let mut optim = Sgd::new(vec![p, sum], SgdConfig::default()).unwrap();
        assert_eq!(
            optim.step(&graph),
            Err(ScalarGradError::NotALeaf { index: sum.index() })
        );
        assert_eq!(graph.value(p).unwrap(), 1.0);
    }

    #[test]
    fn test_sgd_set_learning_rate() {
        let mut optim = Sgd::new(vec![], SgdConfig::default()).unwrap();
        optim.set_learning_rate(0.01).unwrap();
        assert_eq!(optim.config().learning_rate, 0.01);
        assert!(optim.set_learning_rate(-1.0).is_err());
        assert_eq!(optim.config().learning_rate, 0.01);
    }
}
