//! Modulus switching, switching-key generation and dimension reduction.
use super::{LweEngine, LweError, LweResult};
use crate::ciphertext::Ciphertext;
use crate::keys::{SecretKey, SwitchingKey};
use crate::math::{ModVector, Modulus};
use log::debug;
use rand::Rng;

impl LweEngine {
    /// Rescales `ct` to modulus `q`. See [`Ciphertext::mod_switch`].
    pub fn mod_switch(&self, q: Modulus, ct: &Ciphertext) -> Ciphertext {
        ct.mod_switch(q)
    }

    /// Switching key from `sk_n` (dimension `N`) to `sk` (dimension `n`).
    pub fn key_switch_gen<R: Rng + ?Sized>(
        &self,
        sk: &SecretKey,
        sk_n: &SecretKey,
        rng: &mut R,
    ) -> LweResult<SwitchingKey> {
        SwitchingKey::generate(self.params(), sk, sk_n, rng)
    }

    /// Adds the shares `(sk_i, sk_n_i)` of one more party to `prior`.
    ///
    /// The returned key shares `prior`'s masks; `prior` itself is unchanged.
    pub fn multiparty_key_switch_gen<R: Rng + ?Sized>(
        &self,
        sk_i: &SecretKey,
        sk_n_i: &SecretKey,
        prior: &SwitchingKey,
        rng: &mut R,
    ) -> LweResult<SwitchingKey> {
        prior.extend(self.params(), sk_i, sk_n_i, rng)
    }

    /// Re-encrypts an `N`-dimensional ciphertext modulo `qKS` under the
    /// `n`-dimensional target key of `ksk`.
    ///
    /// Every `a[i]` is split into base-`baseKS` digits, least significant
    /// first, and the matching key entry is subtracted for each digit.
    pub fn key_switch(&self, ksk: &SwitchingKey, ct: &Ciphertext) -> LweResult<Ciphertext> {
        let params = self.params();
        ksk.check_params(params)?;
        if ct.dimension() != params.ring_dim() {
            return Err(LweError::DimensionMismatch {
                expected: params.ring_dim(),
                actual: ct.dimension(),
            });
        }
        let q_ks = params.q_ks();
        if ct.modulus() != &q_ks {
            return Err(LweError::ModulusMismatch {
                expected: q_ks.value(),
                actual: ct.modulus().value(),
            });
        }

        let base = ksk.base();
        let mut a = ModVector::zero(ksk.target_dim(), q_ks);
        let mut b = ct.b();
        for (i, &a_i) in ct.a().iter().enumerate() {
            let mut rest = a_i;
            for k in 0..ksk.digit_count() {
                let digit = (rest % base) as usize;
                rest /= base;
                a.sub_assign_slice(ksk.entry_a(i, digit, k));
                b = q_ks.sub(b, ksk.entry_b(i, digit, k));
            }
        }
        Ok(Ciphertext::new(a, b, ct.plaintext_modulus()))
    }

    /// `Q`/`N` ciphertext to `q`/`n`: switch to `qKS`, key switch, switch to `q`.
    pub fn switch_ct_to_qn(&self, ksk: &SwitchingKey, ct: &Ciphertext) -> LweResult<Ciphertext> {
        let params = self.params();
        debug!(
            "switching ciphertext N={} mod {} -> qKS={} -> n={} mod {}",
            ct.dimension(),
            ct.modulus().value(),
            params.q_ks().value(),
            params.n(),
            params.q().value()
        );
        let at_q_ks = ct.mod_switch(params.q_ks());
        let switched = self.key_switch(ksk, &at_q_ks)?;
        Ok(switched.mod_switch(params.q()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn engine(ks_error_std: f64) -> LweEngine {
        LweEngine::builder()
            .n(8)
            .ring_dim(16)
            .ks_error_std(ks_error_std)
            .build()
            .unwrap()
    }

    #[test]
    fn noiseless_key_switch_preserves_phase() {
        let engine = engine(0.0);
        let mut rng = ChaCha20Rng::seed_from_u64(20);
        let sk = engine.generate_secret_key(&mut rng);
        let sk_n = engine.generate_ring_secret_key(&mut rng);
        let ksk = engine.key_switch_gen(&sk, &sk_n, &mut rng).unwrap();

        let q_ks = engine.params().q_ks();
        let ct = engine.encrypt(&sk_n, 2, 4, q_ks, &mut rng).unwrap();
        assert_eq!(ct.dimension(), 16);
        let switched = engine.key_switch(&ksk, &ct).unwrap();
        assert_eq!(switched.dimension(), 8);
        assert_eq!(switched.plaintext_modulus(), 4);
        assert_eq!(
            switched.phase(&sk.switched(q_ks)),
            ct.phase(&sk_n.switched(q_ks))
        );
        assert_eq!(engine.decrypt(&sk, &switched, 4), Ok(2));
    }

    #[test]
    fn full_pipeline_recovers_message() {
        let engine = engine(3.19);
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let sk = engine.generate_secret_key(&mut rng);
        let pair = engine.generate_key_pair(&mut rng);
        let ksk = engine
            .key_switch_gen(&sk, &pair.secret_key, &mut rng)
            .unwrap();

        let big_q = engine.params().big_q();
        for m in 0..4 {
            let ct = engine
                .encrypt_public(&pair.public_key, m, 4, big_q, &mut rng)
                .unwrap();
            let small = engine.switch_ct_to_qn(&ksk, &ct).unwrap();
            assert_eq!(small.dimension(), 8);
            assert_eq!(small.modulus(), &engine.params().q());
            assert_eq!(engine.decrypt(&sk, &small, 4).unwrap(), m);
        }
    }

    #[test]
    fn key_switch_requires_key_switching_modulus() {
        let engine = engine(0.0);
        let mut rng = ChaCha20Rng::seed_from_u64(22);
        let sk = engine.generate_secret_key(&mut rng);
        let pair = engine.generate_key_pair(&mut rng);
        let ksk = engine
            .key_switch_gen(&sk, &pair.secret_key, &mut rng)
            .unwrap();
        let ct = engine
            .encrypt_public(&pair.public_key, 1, 4, engine.params().big_q(), &mut rng)
            .unwrap();
        assert_eq!(
            engine.key_switch(&ksk, &ct),
            Err(LweError::ModulusMismatch {
                expected: 1 << 14,
                actual: 1 << 27
            })
        );
    }

    #[test]
    fn key_switch_rejects_small_ciphertexts() {
        let engine = engine(0.0);
        let mut rng = ChaCha20Rng::seed_from_u64(23);
        let sk = engine.generate_secret_key(&mut rng);
        let sk_n = engine.generate_ring_secret_key(&mut rng);
        let ksk = engine.key_switch_gen(&sk, &sk_n, &mut rng).unwrap();
        let ct = engine
            .encrypt(&sk, 1, 4, engine.params().q_ks(), &mut rng)
            .unwrap();
        assert_eq!(
            engine.key_switch(&ksk, &ct),
            Err(LweError::DimensionMismatch {
                expected: 16,
                actual: 8
            })
        );
    }

    #[test]
    fn key_from_other_parameters_is_rejected() {
        let engine = engine(0.0);
        let mut rng = ChaCha20Rng::seed_from_u64(24);
        let sk = engine.generate_secret_key(&mut rng);
        let sk_n = engine.generate_ring_secret_key(&mut rng);
        let ksk = engine.key_switch_gen(&sk, &sk_n, &mut rng).unwrap();

        let other = LweEngine::builder().n(8).ring_dim(32).build().unwrap();
        let ct = Ciphertext::new(ModVector::zero(32, other.params().q_ks()), 0, 4);
        assert!(matches!(
            other.key_switch(&ksk, &ct),
            Err(LweError::DimensionMismatch { .. })
        ));
    }
}
