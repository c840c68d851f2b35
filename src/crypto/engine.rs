use super::builder::LweEngineBuilder;
use super::{LweParams, LweResult};
use crate::keys::{KeyPair, PublicKey, SecretKey};
use crate::math::Modulus;
use log::debug;
use rand::Rng;

/// Entry point for every LWE operation under one parameter set.
///
/// Operations that need randomness borrow the caller's generator; nothing
/// here owns or shares a generator between calls.
#[derive(Debug, Clone)]
pub struct LweEngine {
    params: LweParams,
}

impl LweEngine {
    pub fn builder() -> LweEngineBuilder {
        LweEngineBuilder::new()
    }

    pub fn new(params: LweParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LweParams {
        &self.params
    }

    /// Samples a secret of `size` coordinates under `modulus` with the
    /// configured key distribution.
    pub fn generate_key<R: Rng + ?Sized>(
        &self,
        size: usize,
        modulus: Modulus,
        rng: &mut R,
    ) -> SecretKey {
        SecretKey::generate(
            size,
            modulus,
            self.params.key_distribution(),
            self.params.error_std(),
            rng,
        )
    }

    /// Secret of dimension `n` modulo `q`.
    pub fn generate_secret_key<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretKey {
        self.generate_key(self.params.n(), self.params.q(), rng)
    }

    /// Secret of dimension `N` modulo `Q`.
    pub fn generate_ring_secret_key<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretKey {
        self.generate_key(self.params.ring_dim(), self.params.big_q(), rng)
    }

    /// Derives `(A, v = A·s + e)` for an `N`-dimensional secret modulo `Q`.
    pub fn generate_public_key<R: Rng + ?Sized>(
        &self,
        sk_n: &SecretKey,
        rng: &mut R,
    ) -> LweResult<PublicKey> {
        sk_n.check_shape(self.params.ring_dim(), &self.params.big_q())?;
        Ok(PublicKey::generate(sk_n, self.params.error_std(), rng))
    }

    pub fn generate_key_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> KeyPair {
        let sk_n = self.generate_ring_secret_key(rng);
        let pk = PublicKey::generate(&sk_n, self.params.error_std(), rng);
        KeyPair::new(pk, sk_n)
    }

    /// Joint key pair from every party's secret share, held by one combiner.
    pub fn multiparty_key_gen<R: Rng + ?Sized>(
        &self,
        shares: &[SecretKey],
        rng: &mut R,
    ) -> LweResult<KeyPair> {
        let sk = SecretKey::aggregate(shares)?;
        let pk = self.generate_public_key(&sk, rng)?;
        debug!("multiparty key pair built from {} shares", shares.len());
        Ok(KeyPair::new(pk, sk))
    }

    /// Folds one party's secret into a running joint public key.
    pub fn multiparty_public_key<R: Rng + ?Sized>(
        &self,
        party_secret: &SecretKey,
        prior: &PublicKey,
        rng: &mut R,
    ) -> LweResult<PublicKey> {
        prior.accumulate(party_secret, self.params.error_std(), rng)
    }
}
