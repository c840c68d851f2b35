use super::{KeyDistribution, LweEngine, LweError, LweParams, LweResult};
use crate::math::Modulus;

pub const DEFAULT_N: usize = 16;
pub const DEFAULT_RING_DIM: usize = 64;
pub const DEFAULT_Q: u64 = 1 << 10;
pub const DEFAULT_BIG_Q: u64 = 1 << 27;
pub const DEFAULT_Q_KS: u64 = 1 << 14;
pub const DEFAULT_BASE_KS: u64 = 32;
pub const DEFAULT_PLAINTEXT_MODULUS: u64 = 4;
pub const DEFAULT_ERROR_STD: f64 = 3.19;

pub struct LweEngineBuilder {
    n: Option<usize>,
    ring_dim: Option<usize>,
    q: Option<u64>,
    big_q: Option<u64>,
    q_ks: Option<u64>,
    base_ks: Option<u64>,
    plaintext_modulus: Option<u64>,
    key_distribution: Option<KeyDistribution>,
    error_std: Option<f64>,
    ks_error_std: Option<f64>,
}

impl Default for LweEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LweEngineBuilder {
    pub fn new() -> Self {
        Self {
            n: None,
            ring_dim: None,
            q: None,
            big_q: None,
            q_ks: None,
            base_ks: None,
            plaintext_modulus: None,
            key_distribution: None,
            error_std: None,
            ks_error_std: None,
        }
    }

    pub fn n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    pub fn ring_dim(mut self, ring_dim: usize) -> Self {
        self.ring_dim = Some(ring_dim);
        self
    }

    pub fn q(mut self, q: u64) -> Self {
        self.q = Some(q);
        self
    }

    pub fn big_q(mut self, big_q: u64) -> Self {
        self.big_q = Some(big_q);
        self
    }

    pub fn q_ks(mut self, q_ks: u64) -> Self {
        self.q_ks = Some(q_ks);
        self
    }

    pub fn base_ks(mut self, base_ks: u64) -> Self {
        self.base_ks = Some(base_ks);
        self
    }

    pub fn plaintext_modulus(mut self, p: u64) -> Self {
        self.plaintext_modulus = Some(p);
        self
    }

    pub fn key_distribution(mut self, distribution: KeyDistribution) -> Self {
        self.key_distribution = Some(distribution);
        self
    }

    pub fn error_std(mut self, std_dev: f64) -> Self {
        self.error_std = Some(std_dev);
        self
    }

    pub fn ks_error_std(mut self, std_dev: f64) -> Self {
        self.ks_error_std = Some(std_dev);
        self
    }

    pub fn build_params(self) -> LweResult<LweParams> {
        let n = self.n.unwrap_or(DEFAULT_N);
        let ring_dim = self.ring_dim.unwrap_or(DEFAULT_RING_DIM);
        if n == 0 || ring_dim == 0 {
            return Err(LweError::InvalidParameter {
                message: format!("dimensions must be positive, got n={n}, N={ring_dim}"),
            });
        }

        let q = Modulus::new(self.q.unwrap_or(DEFAULT_Q))?;
        let big_q = Modulus::new(self.big_q.unwrap_or(DEFAULT_BIG_Q))?;
        let q_ks = Modulus::new(self.q_ks.unwrap_or(DEFAULT_Q_KS))?;

        let base_ks = self.base_ks.unwrap_or(DEFAULT_BASE_KS);
        if base_ks < 2 || base_ks > q_ks.value() {
            return Err(LweError::InvalidParameter {
                message: format!(
                    "baseKS must lie in [2, qKS={}], got {base_ks}",
                    q_ks.value()
                ),
            });
        }

        let plaintext_modulus =
            self.plaintext_modulus.unwrap_or(DEFAULT_PLAINTEXT_MODULUS);
        if plaintext_modulus < 2 {
            return Err(LweError::InvalidParameter {
                message: format!("plaintext modulus must be >= 2, got {plaintext_modulus}"),
            });
        }

        let error_std = self.error_std.unwrap_or(DEFAULT_ERROR_STD);
        let ks_error_std = self.ks_error_std.unwrap_or(DEFAULT_ERROR_STD);
        for (name, std_dev) in [("error_std", error_std), ("ks_error_std", ks_error_std)] {
            if !(std_dev.is_finite() && std_dev >= 0.0) {
                return Err(LweError::InvalidParameter {
                    message: format!("{name} must be finite and non-negative, got {std_dev}"),
                });
            }
        }

        Ok(LweParams {
            n,
            ring_dim,
            q,
            big_q,
            q_ks,
            base_ks,
            plaintext_modulus,
            key_distribution: self.key_distribution.unwrap_or_default(),
            error_std,
            ks_error_std,
        })
    }

    pub fn build(self) -> LweResult<LweEngine> {
        Ok(LweEngine::new(self.build_params()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let params = LweEngineBuilder::new().build_params().unwrap();
        assert_eq!(params.n(), DEFAULT_N);
        assert_eq!(params.ring_dim(), DEFAULT_RING_DIM);
        assert_eq!(params.q().value(), DEFAULT_Q);
        assert_eq!(params.big_q().value(), DEFAULT_BIG_Q);
        assert_eq!(params.key_distribution(), KeyDistribution::UniformTernary);
        // 32^3 = 2^15 >= 2^14 > 32^2
        assert_eq!(params.digit_count(), 3);
        assert_eq!(params.digit_weights(), vec![1, 32, 1024]);
    }

    #[test]
    fn digit_count_is_exact_for_powers_of_the_base() {
        let params = LweEngineBuilder::new()
            .q_ks(1024)
            .base_ks(32)
            .build_params()
            .unwrap();
        assert_eq!(params.digit_count(), 2);

        let params = LweEngineBuilder::new()
            .q_ks(1025)
            .base_ks(32)
            .build_params()
            .unwrap();
        assert_eq!(params.digit_count(), 3);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = LweEngineBuilder::new().n(0).build().unwrap_err();
        assert!(matches!(err, LweError::InvalidParameter { .. }));
        let err = LweEngineBuilder::new().ring_dim(0).build().unwrap_err();
        assert!(matches!(err, LweError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_bad_base() {
        let err = LweEngineBuilder::new().base_ks(1).build().unwrap_err();
        assert!(matches!(err, LweError::InvalidParameter { .. }));
        let err = LweEngineBuilder::new()
            .q_ks(64)
            .base_ks(128)
            .build()
            .unwrap_err();
        assert!(matches!(err, LweError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_bad_moduli_and_noise() {
        let err = LweEngineBuilder::new().q(1).build().unwrap_err();
        assert_eq!(err, LweError::InvalidModulus { modulus: 1 });
        let err = LweEngineBuilder::new().error_std(-1.0).build().unwrap_err();
        assert!(matches!(err, LweError::InvalidParameter { .. }));
        let err = LweEngineBuilder::new()
            .ks_error_std(f64::INFINITY)
            .build()
            .unwrap_err();
        assert!(matches!(err, LweError::InvalidParameter { .. }));
    }

    #[test]
    fn divisibility_is_not_checked_at_construction() {
        // q = 1000 is not a multiple of 2p = 8; only operations reject it
        assert!(LweEngineBuilder::new().q(1000).build().is_ok());
    }
}
