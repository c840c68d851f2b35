use crate::math::Modulus;

/// Distribution secret keys are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDistribution {
    /// Coefficients uniform in `{-1, 0, 1}`.
    #[default]
    UniformTernary,
    /// Rounded Gaussian coefficients with the encryption standard deviation.
    Gaussian,
}

/// Immutable parameter bundle shared by every LWE operation.
///
/// Built and validated by [`LweEngineBuilder`](super::LweEngineBuilder).
/// Divisibility between ciphertext and plaintext moduli is checked by the
/// operations that need it, not here.
#[derive(Debug, Clone)]
pub struct LweParams {
    pub(crate) n: usize,
    pub(crate) ring_dim: usize,
    pub(crate) q: Modulus,
    pub(crate) big_q: Modulus,
    pub(crate) q_ks: Modulus,
    pub(crate) base_ks: u64,
    pub(crate) plaintext_modulus: u64,
    pub(crate) key_distribution: KeyDistribution,
    pub(crate) error_std: f64,
    pub(crate) ks_error_std: f64,
}

impl LweParams {
    /// LWE dimension `n` of the small secret.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Dimension `N` of the large secret and the public key.
    pub fn ring_dim(&self) -> usize {
        self.ring_dim
    }

    /// Ciphertext modulus `q` of the small ciphertexts.
    pub fn q(&self) -> Modulus {
        self.q
    }

    /// Modulus `Q` of the large secret and the public key.
    pub fn big_q(&self) -> Modulus {
        self.big_q
    }

    pub fn q_ks(&self) -> Modulus {
        self.q_ks
    }

    pub fn base_ks(&self) -> u64 {
        self.base_ks
    }

    pub fn plaintext_modulus(&self) -> u64 {
        self.plaintext_modulus
    }

    pub fn key_distribution(&self) -> KeyDistribution {
        self.key_distribution
    }

    pub fn error_std(&self) -> f64 {
        self.error_std
    }

    pub fn ks_error_std(&self) -> f64 {
        self.ks_error_std
    }

    /// Number of base-`baseKS` digits needed for any residue mod `qKS`.
    ///
    /// Smallest `d` with `baseKS^d >= qKS`.
    pub fn digit_count(&self) -> usize {
        let q_ks = self.q_ks.value() as u128;
        let base = self.base_ks as u128;
        let mut count = 0;
        let mut power = 1u128;
        while power < q_ks {
            power *= base;
            count += 1;
        }
        count
    }

    /// Gadget weights `baseKS^k` for `k` in `[0, digit_count)`, reduced mod `qKS`.
    pub fn digit_weights(&self) -> Vec<u64> {
        let q_ks = self.q_ks;
        let mut weights = Vec::with_capacity(self.digit_count());
        let mut value = 1u64;
        for _ in 0..self.digit_count() {
            weights.push(value);
            value = q_ks.mul(value, q_ks.reduce(self.base_ks));
        }
        weights
    }
}
