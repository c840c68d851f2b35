#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use toy_lwe_fhe::LweEngine;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Default parameters: n=16, N=64, q=2^10, Q=2^27, qKS=2^14, baseKS=32.
pub fn default_engine() -> LweEngine {
    LweEngine::builder().build().unwrap()
}
