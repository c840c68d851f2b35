//! Homomorphic linear operations with operand validation.
//!
//! These wrap the in-place methods on [`Ciphertext`] and report shape
//! mismatches as errors instead of panicking.
use super::{LweEngine, LweError, LweResult};
use crate::ciphertext::Ciphertext;

impl LweEngine {
    /// `ct1 += ct2`.
    pub fn eval_add(&self, ct1: &mut Ciphertext, ct2: &Ciphertext) -> LweResult<()> {
        check_compatible(ct1, ct2)?;
        *ct1 += ct2;
        Ok(())
    }

    /// `ct1 -= ct2`.
    pub fn eval_sub(&self, ct1: &mut Ciphertext, ct2: &Ciphertext) -> LweResult<()> {
        check_compatible(ct1, ct2)?;
        *ct1 -= ct2;
        Ok(())
    }

    /// `ct2 = ct1 - ct2`, written into `ct2`.
    pub fn eval_sub_reversed(&self, ct1: &Ciphertext, ct2: &mut Ciphertext) -> LweResult<()> {
        check_compatible(ct1, ct2)?;
        ct2.rsub_assign(ct1);
        Ok(())
    }

    pub fn eval_add_const(&self, ct: &mut Ciphertext, constant: u64) {
        ct.add_const_assign(constant);
    }

    pub fn eval_sub_const(&self, ct: &mut Ciphertext, constant: u64) {
        ct.sub_const_assign(constant);
    }

    pub fn eval_mult_const(&self, ct: &mut Ciphertext, constant: u64) {
        ct.mul_const_assign(constant);
    }
}

fn check_compatible(lhs: &Ciphertext, rhs: &Ciphertext) -> LweResult<()> {
    if lhs.modulus() != rhs.modulus() {
        return Err(LweError::ModulusMismatch {
            expected: lhs.modulus().value(),
            actual: rhs.modulus().value(),
        });
    }
    if lhs.dimension() != rhs.dimension() {
        return Err(LweError::DimensionMismatch {
            expected: lhs.dimension(),
            actual: rhs.dimension(),
        });
    }
    Ok(())
}
