use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_uniform_symmetric_within_bounds() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(7);
    let params = uniform_symmetric(&graph, 500, &mut rng).unwrap();
    assert_eq!(params.len(), 500);
    for id in params {
        let v = graph.value(id).unwrap();
        assert!((-INIT_BOUND..=INIT_BOUND).contains(&v), "{} out of range", v);
        assert_eq!(graph.grad(id).unwrap(), 0.0);
    }
}

#[test]
fn test_uniform_is_reproducible_with_seed() {
    let draw = |seed| {
        let graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let ids = uniform(&graph, 8, -0.5, 0.5, &mut rng).unwrap();
        ids.iter()
            .map(|&id| graph.value(id).unwrap())
            .collect::<Vec<f64>>()
    };
    assert_eq!(draw(3), draw(3));
    assert_ne!(draw(3), draw(4));
}

#[test]
fn test_uniform_rejects_bad_bounds() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        uniform(&graph, 1, 1.0, -1.0, &mut rng),
        Err(ScalarGradError::InvalidConfig(_))
    ));
    assert!(uniform(&graph, 1, f64::NAN, 1.0, &mut rng).is_err());
    assert!(graph.is_empty());
}
