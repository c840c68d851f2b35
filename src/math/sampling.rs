use super::{modular::Modulus, vector::ModVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

/// Samples `len` residues uniformly from `[0, q)`.
pub fn uniform_vector<R: Rng + ?Sized>(
    len: usize,
    modulus: Modulus,
    rng: &mut R,
) -> ModVector {
    let q = modulus.value();
    let values = (0..len).map(|_| rng.random_range(0..q)).collect();
    ModVector::from_reduced(values, modulus)
}

/// Samples `len` coefficients uniformly from `{-1, 0, 1}`.
pub fn ternary_vector<R: Rng + ?Sized>(
    len: usize,
    modulus: Modulus,
    rng: &mut R,
) -> ModVector {
    let values = (0..len)
        .map(|_| modulus.reduce_signed(rng.random_range(-1i64..=1)))
        .collect();
    ModVector::from_reduced(values, modulus)
}

/// Samples rounded Gaussian integers and maps them into `[0, q)`.
///
/// A zero `std_dev` yields the all-zero vector.
///
/// # Panics
///
/// Panics if `std_dev` is negative or not finite.
pub fn gaussian_vector<R: Rng + ?Sized>(
    len: usize,
    std_dev: f64,
    modulus: Modulus,
    rng: &mut R,
) -> ModVector {
    if std_dev == 0.0 {
        return ModVector::zero(len, modulus);
    }
    let normal = Normal::new(0.0, std_dev).unwrap_or_else(|_| {
        panic!("gaussian_vector: std_dev must be finite and non-negative, got {std_dev}")
    });
    let values = (0..len)
        .map(|_| modulus.reduce_signed(normal.sample(rng).round() as i64))
        .collect();
    ModVector::from_reduced(values, modulus)
}

/// Single rounded Gaussian sample in `[0, q)`.
pub fn gaussian_scalar<R: Rng + ?Sized>(
    std_dev: f64,
    modulus: Modulus,
    rng: &mut R,
) -> u64 {
    gaussian_vector(1, std_dev, modulus, rng)[0]
}

/// Derives `count` independent generators from `rng`, one per parallel worker.
///
/// Seeds are drawn serially, so the result depends only on the state of
/// `rng` and not on how work is later scheduled.
pub fn fork_rngs<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<ChaCha20Rng> {
    (0..count)
        .map(|_| {
            let mut seed = [0u8; 32];
            rng.fill(&mut seed);
            ChaCha20Rng::from_seed(seed)
        })
        .collect()
}
