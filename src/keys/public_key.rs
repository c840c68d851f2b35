use crate::crypto::{LweError, LweResult};
use crate::keys::SecretKey;
use crate::math::{ModVector, Modulus, gaussian_vector, uniform_vector};
use log::debug;
use rand::Rng;
use rayon::prelude::*;
use std::sync::Arc;

/// LWE public key `(A, v)` with `v = A·s + e`.
///
/// `A` is a uniform `N x N` matrix stored row by row. It sits behind an
/// [`Arc`] so every key derived from it through
/// [`PublicKey::accumulate`] shares the same matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    a: Arc<Vec<ModVector>>,
    v: ModVector,
}

impl PublicKey {
    /// Samples a fresh matrix and derives `v` for `secret_key`.
    ///
    /// The matrix side and modulus are the key's dimension and modulus.
    pub fn generate<R: Rng + ?Sized>(
        secret_key: &SecretKey,
        error_std: f64,
        rng: &mut R,
    ) -> Self {
        let dim = secret_key.dimension();
        let modulus = *secret_key.modulus();
        let a: Vec<ModVector> = (0..dim)
            .map(|_| uniform_vector(dim, modulus, rng))
            .collect();
        let e = gaussian_vector(dim, error_std, modulus, rng);
        let v = matrix_times_secret(&a, secret_key.element(), e);
        debug!("generated public key: N={dim}, Q={}", modulus.value());
        Self { a: Arc::new(a), v }
    }

    /// Adds one more party's `A·s_i + e_i` to this key.
    ///
    /// Returns a new key sharing this key's matrix; `self` is left as is.
    pub fn accumulate<R: Rng + ?Sized>(
        &self,
        party_secret: &SecretKey,
        error_std: f64,
        rng: &mut R,
    ) -> LweResult<Self> {
        party_secret.check_shape(self.dimension(), self.modulus())?;
        let e = gaussian_vector(self.dimension(), error_std, *self.modulus(), rng);
        let mut v = matrix_times_secret(&self.a, party_secret.element(), e);
        v += &self.v;
        debug!("accumulated public key share: N={}", self.dimension());
        Ok(Self {
            a: Arc::clone(&self.a),
            v,
        })
    }

    pub fn a(&self) -> &[ModVector] {
        &self.a
    }

    pub fn v(&self) -> &ModVector {
        &self.v
    }

    pub fn dimension(&self) -> usize {
        self.v.len()
    }

    pub fn modulus(&self) -> &Modulus {
        self.v.modulus()
    }

    /// Whether both keys were built on the same matrix `A`.
    pub fn shares_matrix_with(&self, other: &PublicKey) -> bool {
        Arc::ptr_eq(&self.a, &other.a) || self.a == other.a
    }

    pub(crate) fn check_modulus(&self, modulus: &Modulus) -> LweResult<()> {
        if self.modulus() != modulus {
            return Err(LweError::ModulusMismatch {
                expected: self.modulus().value(),
                actual: modulus.value(),
            });
        }
        Ok(())
    }
}

/// `v[j] = e[j] + sum_i A[j][i]·s[i]`, rows computed in parallel.
fn matrix_times_secret(a: &[ModVector], s: &ModVector, e: ModVector) -> ModVector {
    let modulus = *e.modulus();
    let values: Vec<u64> = a
        .par_iter()
        .zip(e.values().par_iter())
        .map(|(row, &e_j)| modulus.add(e_j, row.dot(s)))
        .collect();
    ModVector::from_reduced(values, modulus)
}
