//! Secret keys: short vectors sampled from a small distribution.
use crate::crypto::{KeyDistribution, LweError, LweResult};
use crate::math::{ModVector, Modulus, gaussian_vector, ternary_vector};
use rand::Rng;
use std::fmt;

/// An LWE secret of dimension `n` (or `N`), stored under one modulus.
///
/// Coefficients are small signed values; negative entries are kept as
/// `q - |x|`. The only way to change a key after sampling is
/// [`SecretKey::aggregate`], which builds a new key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    element: ModVector,
}

impl SecretKey {
    /// Samples `size` coefficients modulo `modulus`.
    ///
    /// `std_dev` is only read for [`KeyDistribution::Gaussian`].
    pub fn generate<R: Rng + ?Sized>(
        size: usize,
        modulus: Modulus,
        distribution: KeyDistribution,
        std_dev: f64,
        rng: &mut R,
    ) -> Self {
        let element = match distribution {
            KeyDistribution::UniformTernary => ternary_vector(size, modulus, rng),
            KeyDistribution::Gaussian => gaussian_vector(size, std_dev, modulus, rng),
        };
        Self { element }
    }

    pub fn from_signed(coeffs: &[i64], modulus: Modulus) -> Self {
        Self {
            element: ModVector::from_signed(coeffs, modulus),
        }
    }

    /// Coordinate-wise sum of additive shares.
    ///
    /// All shares must agree on dimension and modulus.
    pub fn aggregate(shares: &[SecretKey]) -> LweResult<Self> {
        let (first, rest) = shares.split_first().ok_or(LweError::EmptyShares)?;
        let mut element = first.element.clone();
        for share in rest {
            share.check_shape(first.dimension(), first.modulus())?;
            element += &share.element;
        }
        Ok(Self { element })
    }

    pub fn element(&self) -> &ModVector {
        &self.element
    }

    pub fn dimension(&self) -> usize {
        self.element.len()
    }

    pub fn modulus(&self) -> &Modulus {
        self.element.modulus()
    }

    /// Key coefficients reinterpreted under `modulus`, signs preserved.
    pub(crate) fn switched(&self, modulus: Modulus) -> ModVector {
        self.element.switch_modulus(modulus)
    }

    pub(crate) fn check_shape(&self, dimension: usize, modulus: &Modulus) -> LweResult<()> {
        if self.dimension() != dimension {
            return Err(LweError::DimensionMismatch {
                expected: dimension,
                actual: self.dimension(),
            });
        }
        if self.modulus() != modulus {
            return Err(LweError::ModulusMismatch {
                expected: modulus.value(),
                actual: self.modulus().value(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_dimension(&self, dimension: usize) -> LweResult<()> {
        if self.dimension() != dimension {
            return Err(LweError::DimensionMismatch {
                expected: dimension,
                actual: self.dimension(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("dimension", &self.dimension())
            .field("modulus", &self.modulus().value())
            .finish_non_exhaustive()
    }
}
