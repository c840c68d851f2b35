//! Secret-key and public-key encryption, decryption and noise measurement.
use super::{LweEngine, LweError, LweResult};
use crate::ciphertext::{Ciphertext, LwePlaintext};
use crate::keys::{PublicKey, SecretKey};
use crate::math::{ModVector, Modulus, gaussian_scalar, gaussian_vector, ternary_vector, uniform_vector};
use log::trace;
use rand::Rng;

/// Plaintext modulus implied by [`LweEngine::noiseless_embedding`].
pub const EMBEDDING_PLAINTEXT_MODULUS: u64 = 4;

impl LweEngine {
    /// Encrypts `m` under `sk` as a fresh ciphertext modulo `modulus`.
    ///
    /// The ciphertext has the dimension of `sk`, so both `n` and `N`
    /// dimensional keys can encrypt. The secret is read sign-preserving under
    /// `modulus`, so a key sampled modulo `q` encrypts just as well modulo
    /// `qKS`.
    ///
    /// # Errors
    /// [`LweError::NotDivisible`] if `modulus` is not a multiple of `p`.
    pub fn encrypt<R: Rng + ?Sized>(
        &self,
        sk: &SecretKey,
        m: LwePlaintext,
        p: u64,
        modulus: Modulus,
        rng: &mut R,
    ) -> LweResult<Ciphertext> {
        check_divisible(&modulus, p)?;
        let a = uniform_vector(sk.dimension(), modulus, rng);
        let noise = gaussian_scalar(self.params().error_std(), modulus, rng);
        Ok(encrypt_with_mask(sk, m, p, a, noise))
    }

    /// Encrypts `m` against a public key; the result has dimension `N`.
    ///
    /// `modulus` must be the public key's modulus since `A` is only defined
    /// there.
    pub fn encrypt_public<R: Rng + ?Sized>(
        &self,
        pk: &PublicKey,
        m: LwePlaintext,
        p: u64,
        modulus: Modulus,
        rng: &mut R,
    ) -> LweResult<Ciphertext> {
        pk.check_modulus(&modulus)?;
        check_divisible(&modulus, p)?;

        let dim = pk.dimension();
        let std_dev = self.params().error_std();
        let sp = ternary_vector(dim, modulus, rng);
        let mut a = gaussian_vector(dim, std_dev, modulus, rng);
        for (row, &sp_j) in pk.a().iter().zip(&sp) {
            if sp_j != 0 {
                a.mul_add_assign(row, sp_j);
            }
        }

        let noise = gaussian_scalar(std_dev, modulus, rng);
        let b = modulus.add(
            modulus.add(pk.v().dot(&sp), noise),
            scaled_message(m, p, &modulus),
        );
        Ok(Ciphertext::new(a, b, p))
    }

    /// Recovers the message `⌊p·(b - <a, s>)/q + 1/2⌋ mod p`.
    ///
    /// # Errors
    /// [`LweError::NotDivisible`] if the ciphertext modulus is not a multiple
    /// of `2p`, [`LweError::DimensionMismatch`] if `sk` does not match `ct`.
    pub fn decrypt(&self, sk: &SecretKey, ct: &Ciphertext, p: u64) -> LweResult<LwePlaintext> {
        let q = *ct.modulus();
        check_decryptable(&q, p)?;
        sk.check_dimension(ct.dimension())?;
        Ok(round_to_plaintext(ct.phase(&sk.switched(q)), p, &q))
    }

    /// Decrypts and also reports the signed error left in the phase.
    ///
    /// The error is `b - <a, s> - m·(q/p)` centered in `(-q/2, q/2]`.
    pub fn decrypt_with_noise(
        &self,
        sk: &SecretKey,
        ct: &Ciphertext,
        p: u64,
    ) -> LweResult<(LwePlaintext, i64)> {
        let q = *ct.modulus();
        check_decryptable(&q, p)?;
        sk.check_dimension(ct.dimension())?;

        let phase = ct.phase(&sk.switched(q));
        let m = round_to_plaintext(phase, p, &q);
        let noise = q.center(q.sub(phase, scaled_message(m, p, &q)));
        trace!(
            "decrypted m={m} with noise {noise} (bound {})",
            q.value() / (2 * p)
        );
        Ok((m, noise))
    }

    /// Deterministic carrier `(0, (m mod 4)·⌊q/4⌋)` of dimension `n`.
    ///
    /// Always uses plaintext modulus 4 regardless of the configured one.
    pub fn noiseless_embedding(&self, m: LwePlaintext) -> Ciphertext {
        let q = self.params().q();
        let m = m.rem_euclid(EMBEDDING_PLAINTEXT_MODULUS as i64) as u64;
        let b = q.mul(m, q.reduce(q.value() >> 2));
        Ciphertext::new(
            ModVector::zero(self.params().n(), q),
            b,
            EMBEDDING_PLAINTEXT_MODULUS,
        )
    }
}

/// Builds `(a, (m mod p)·q/p + noise + <a, s>)` for a given mask.
pub(crate) fn encrypt_with_mask(
    sk: &SecretKey,
    m: LwePlaintext,
    p: u64,
    a: ModVector,
    noise: u64,
) -> Ciphertext {
    let q = *a.modulus();
    let s = sk.switched(q);
    let b = q.add(q.add(scaled_message(m, p, &q), noise), a.dot(&s));
    Ciphertext::new(a, b, p)
}

pub(crate) fn check_divisible(modulus: &Modulus, divisor: u64) -> LweResult<()> {
    if divisor == 0 || modulus.value() % divisor != 0 {
        return Err(LweError::NotDivisible {
            modulus: modulus.value(),
            divisor,
        });
    }
    Ok(())
}

/// Decryption needs `q` to be a multiple of `2p`.
pub(crate) fn check_decryptable(modulus: &Modulus, p: u64) -> LweResult<()> {
    match p.checked_mul(2) {
        Some(divisor) => check_divisible(modulus, divisor),
        None => Err(LweError::NotDivisible {
            modulus: modulus.value(),
            divisor: u64::MAX,
        }),
    }
}

/// `(m mod p)·(q/p) mod q`.
fn scaled_message(m: LwePlaintext, p: u64, q: &Modulus) -> u64 {
    let m = m.rem_euclid(p as i64) as u64;
    q.mul(m, q.value() / p)
}

/// `⌊p·(phase + q/2p) / q⌋ mod p`.
pub(crate) fn round_to_plaintext(phase: u64, p: u64, q: &Modulus) -> LwePlaintext {
    let shifted = q.add(phase, q.value() / (2 * p));
    let m = (p as u128 * shifted as u128) / q.value() as u128;
    (m as u64 % p) as LwePlaintext
}
