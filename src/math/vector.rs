use super::modular::Modulus;
use std::ops::{AddAssign, Index, SubAssign};

/// A fixed-length sequence of residues sharing one modulus.
///
/// # Invariants
/// - every entry is reduced, i.e. `< modulus.value()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModVector {
    values: Vec<u64>,
    modulus: Modulus,
}

impl ModVector {
    pub fn zero(len: usize, modulus: Modulus) -> Self {
        Self {
            values: vec![0; len],
            modulus,
        }
    }

    /// Reduces arbitrary unsigned values into `[0, q)`.
    pub fn from_values(values: Vec<u64>, modulus: Modulus) -> Self {
        let values = values.into_iter().map(|v| modulus.reduce(v)).collect();
        Self { values, modulus }
    }

    /// Maps signed values into `[0, q)` via `rem_euclid`.
    pub fn from_signed(values: &[i64], modulus: Modulus) -> Self {
        let values = values.iter().map(|&v| modulus.reduce_signed(v)).collect();
        Self { values, modulus }
    }

    pub(crate) fn from_reduced(values: Vec<u64>, modulus: Modulus) -> Self {
        debug_assert!(values.iter().all(|&v| v < modulus.value()));
        Self { values, modulus }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.values.iter()
    }

    /// Centered representatives in `(-q/2, q/2]`.
    pub fn to_signed(&self) -> Vec<i64> {
        self.values.iter().map(|&v| self.modulus.center(v)).collect()
    }

    /// Returns the same values reinterpreted under `modulus`.
    ///
    /// Residues above `q/2` are read as negative numbers, so small signed
    /// vectors (secrets, errors) keep their value across moduli.
    pub fn switch_modulus(&self, modulus: Modulus) -> Self {
        if modulus == self.modulus {
            return self.clone();
        }
        let values = self
            .values
            .iter()
            .map(|&v| modulus.switch_from(v, &self.modulus))
            .collect();
        Self { values, modulus }
    }

    /// `<self, rhs> mod q`.
    pub fn dot(&self, rhs: &Self) -> u64 {
        assert_eq!(self.len(), rhs.len(), "dot: length mismatch");
        self.dot_slice(&rhs.values)
    }

    /// `<self, rhs> mod q` against raw reduced residues.
    pub fn dot_slice(&self, rhs: &[u64]) -> u64 {
        debug_assert_eq!(self.len(), rhs.len());
        let m = &self.modulus;
        self.values
            .iter()
            .zip(rhs)
            .fold(0u64, |acc, (&a, &b)| m.add(acc, m.mul(a, b)))
    }

    /// `self += rhs * scalar`.
    pub fn mul_add_assign(&mut self, rhs: &Self, scalar: u64) {
        assert_eq!(self.len(), rhs.len(), "mul_add_assign: length mismatch");
        let m = self.modulus;
        let scalar = m.reduce(scalar);
        for (a, &b) in self.values.iter_mut().zip(&rhs.values) {
            *a = m.add(*a, m.mul(b, scalar));
        }
    }

    /// `self -= rhs` against raw reduced residues.
    pub fn sub_assign_slice(&mut self, rhs: &[u64]) {
        debug_assert_eq!(self.len(), rhs.len());
        let m = self.modulus;
        for (a, &b) in self.values.iter_mut().zip(rhs) {
            *a = m.sub(*a, b);
        }
    }

    pub fn mul_scalar_assign(&mut self, scalar: u64) {
        let m = self.modulus;
        let scalar = m.reduce(scalar);
        for a in &mut self.values {
            *a = m.mul(*a, scalar);
        }
    }

    /// Replaces `self` with `lhs - self`.
    pub fn rsub_assign(&mut self, lhs: &Self) {
        assert_eq!(self.len(), lhs.len(), "rsub_assign: length mismatch");
        let m = self.modulus;
        for (a, &b) in self.values.iter_mut().zip(&lhs.values) {
            *a = m.sub(b, *a);
        }
    }
}

impl Index<usize> for ModVector {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.values[index]
    }
}

impl AddAssign<&ModVector> for ModVector {
    fn add_assign(&mut self, rhs: &ModVector) {
        assert_eq!(self.modulus, rhs.modulus, "add_assign: modulus mismatch");
        assert_eq!(self.len(), rhs.len(), "add_assign: length mismatch");
        let m = self.modulus;
        for (a, &b) in self.values.iter_mut().zip(&rhs.values) {
            *a = m.add(*a, b);
        }
    }
}

impl SubAssign<&ModVector> for ModVector {
    fn sub_assign(&mut self, rhs: &ModVector) {
        assert_eq!(self.modulus, rhs.modulus, "sub_assign: modulus mismatch");
        assert_eq!(self.len(), rhs.len(), "sub_assign: length mismatch");
        self.sub_assign_slice(&rhs.values);
    }
}

impl<'a> IntoIterator for &'a ModVector {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
