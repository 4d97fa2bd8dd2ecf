use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG shared by the randomized tests.
// Not every test crate uses every helper.
#[allow(dead_code)]
pub(crate) fn test_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `count` random inputs in `[low, high)`.
#[allow(dead_code)]
pub(crate) fn random_inputs(rng: &mut StdRng, count: usize, low: f64, high: f64) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(low..high)).collect()
}

/// Installs `env_logger` once; `RUST_LOG=scalargrad_core=debug` shows engine logs.
#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
