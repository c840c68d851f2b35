//! Gadget switching keys from an `N`-dimensional secret to an `n`-dimensional one.
//!
//! Entry `(i, j, k)` is an LWE encryption of `j·baseKS^k·skN[i]` under the
//! target secret, for every source coordinate `i`, digit value `j` and digit
//! position `k`.
use crate::crypto::{LweError, LweParams, LweResult};
use crate::keys::SecretKey;
use crate::math::{ModVector, Modulus, fork_rngs, gaussian_scalar, uniform_vector};
use log::debug;
use rand::Rng;
use rayon::prelude::*;
use std::sync::Arc;

/// Switching key stored as two flat arenas.
///
/// `a` holds one length-`n` mask per entry and `b` one scalar per entry, both
/// laid out in `(i, j, k)` order. The masks sit behind an [`Arc`] because
/// multiparty extension reuses them unchanged; only `b` is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchingKey {
    a: Arc<Vec<u64>>,
    b: Vec<u64>,
    source_dim: usize,
    target_dim: usize,
    base: u64,
    digit_count: usize,
    modulus: Modulus,
}

impl SwitchingKey {
    /// Builds the key switching from `sk_n` (dimension `N`) to `sk` (dimension `n`).
    pub fn generate<R: Rng + ?Sized>(
        params: &LweParams,
        sk: &SecretKey,
        sk_n: &SecretKey,
        rng: &mut R,
    ) -> LweResult<Self> {
        sk.check_dimension(params.n())?;
        sk_n.check_dimension(params.ring_dim())?;

        let n = params.n();
        let ring_dim = params.ring_dim();
        let base = params.base_ks();
        let digit_count = params.digit_count();
        let q_ks = params.q_ks();
        let std_dev = params.ks_error_std();
        debug!(
            "generating switching key: N={ring_dim}, n={n}, baseKS={base}, digits={digit_count}, qKS={}",
            q_ks.value()
        );

        let sv = sk.switched(q_ks);
        let sv_n = sk_n.switched(q_ks);
        let weights = params.digit_weights();
        let entries_per_coord = base as usize * digit_count;

        let mut a = vec![0u64; ring_dim * entries_per_coord * n];
        let mut b = vec![0u64; ring_dim * entries_per_coord];
        let rngs = fork_rngs(ring_dim, rng);

        a.par_chunks_mut(entries_per_coord * n)
            .zip(b.par_chunks_mut(entries_per_coord))
            .zip(rngs.into_par_iter())
            .enumerate()
            .for_each(|(i, ((a_i, b_i), mut rng))| {
                for j in 0..base {
                    for (k, &weight) in weights.iter().enumerate() {
                        let entry = j as usize * digit_count + k;
                        let mask = uniform_vector(n, q_ks, &mut rng);
                        let noise = gaussian_scalar(std_dev, q_ks, &mut rng);
                        let digit_term = q_ks.mul(sv_n[i], q_ks.mul(j, weight));
                        b_i[entry] = q_ks.add(q_ks.add(digit_term, mask.dot(&sv)), noise);
                        a_i[entry * n..(entry + 1) * n].copy_from_slice(mask.values());
                    }
                }
            });

        Ok(Self {
            a: Arc::new(a),
            b,
            source_dim: ring_dim,
            target_dim: n,
            base,
            digit_count,
            modulus: q_ks,
        })
    }

    /// Adds one more party's shares `(sk_i, sk_n_i)` to this key.
    ///
    /// The masks are shared with `self`; each `B` entry gains
    /// `j·baseKS^k·sk_n_i[i] + <A, sk_i> + e`.
    pub fn extend<R: Rng + ?Sized>(
        &self,
        params: &LweParams,
        sk_i: &SecretKey,
        sk_n_i: &SecretKey,
        rng: &mut R,
    ) -> LweResult<Self> {
        self.check_params(params)?;
        sk_i.check_dimension(params.n())?;
        sk_n_i.check_dimension(params.ring_dim())?;
        debug!("extending switching key with another party share");

        let n = self.target_dim;
        let q_ks = self.modulus;
        let std_dev = params.ks_error_std();
        let sv = sk_i.switched(q_ks);
        let sv_n = sk_n_i.switched(q_ks);
        let weights = params.digit_weights();
        let entries_per_coord = self.entries_per_coord();

        let mut b = self.b.clone();
        let rngs = fork_rngs(self.source_dim, rng);

        b.par_chunks_mut(entries_per_coord)
            .zip(self.a.par_chunks(entries_per_coord * n))
            .zip(rngs.into_par_iter())
            .enumerate()
            .for_each(|(i, ((b_i, a_i), mut rng))| {
                for j in 0..self.base {
                    for (k, &weight) in weights.iter().enumerate() {
                        let entry = j as usize * self.digit_count + k;
                        let mask = &a_i[entry * n..(entry + 1) * n];
                        let noise = gaussian_scalar(std_dev, q_ks, &mut rng);
                        let digit_term = q_ks.mul(sv_n[i], q_ks.mul(j, weight));
                        let share = q_ks.add(q_ks.add(digit_term, sv.dot_slice(mask)), noise);
                        b_i[entry] = q_ks.add(b_i[entry], share);
                    }
                }
            });

        Ok(Self {
            a: Arc::clone(&self.a),
            b,
            ..*self
        })
    }

    pub fn source_dim(&self) -> usize {
        self.source_dim
    }

    pub fn target_dim(&self) -> usize {
        self.target_dim
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// Mask of entry `(i, digit, k)`.
    #[inline]
    pub fn entry_a(&self, i: usize, digit: usize, k: usize) -> &[u64] {
        let start = self.offset(i, digit, k) * self.target_dim;
        &self.a[start..start + self.target_dim]
    }

    /// Body of entry `(i, digit, k)`.
    #[inline]
    pub fn entry_b(&self, i: usize, digit: usize, k: usize) -> u64 {
        self.b[self.offset(i, digit, k)]
    }

    /// Entry `(i, digit, k)` as a standalone ciphertext body pair.
    pub fn entry(&self, i: usize, digit: usize, k: usize) -> (ModVector, u64) {
        let mask = ModVector::from_reduced(self.entry_a(i, digit, k).to_vec(), self.modulus);
        (mask, self.entry_b(i, digit, k))
    }

    /// Whether both keys use the same mask arena.
    pub fn shares_masks_with(&self, other: &SwitchingKey) -> bool {
        Arc::ptr_eq(&self.a, &other.a)
    }

    /// Validates that this key was generated for `params`.
    pub(crate) fn check_params(&self, params: &LweParams) -> LweResult<()> {
        if self.source_dim != params.ring_dim() {
            return Err(LweError::DimensionMismatch {
                expected: params.ring_dim(),
                actual: self.source_dim,
            });
        }
        if self.target_dim != params.n() {
            return Err(LweError::DimensionMismatch {
                expected: params.n(),
                actual: self.target_dim,
            });
        }
        if self.modulus != params.q_ks() {
            return Err(LweError::ModulusMismatch {
                expected: params.q_ks().value(),
                actual: self.modulus.value(),
            });
        }
        if self.base != params.base_ks() || self.digit_count != params.digit_count() {
            return Err(LweError::InvalidParameter {
                message: format!(
                    "switching key uses base {} with {} digits, parameters expect base {} with {}",
                    self.base,
                    self.digit_count,
                    params.base_ks(),
                    params.digit_count()
                ),
            });
        }
        Ok(())
    }

    fn entries_per_coord(&self) -> usize {
        self.base as usize * self.digit_count
    }

    #[inline]
    fn offset(&self, i: usize, digit: usize, k: usize) -> usize {
        debug_assert!(i < self.source_dim && (digit as u64) < self.base && k < self.digit_count);
        (i * self.base as usize + digit) * self.digit_count + k
    }
}
