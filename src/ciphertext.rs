use crate::math::{ModVector, Modulus, round_q_big_q};
use std::ops::{AddAssign, SubAssign};

/// Decrypted message type.
pub type LwePlaintext = i64;

/// LWE ciphertext `(a, b)` with `b - <a, s> ≈ m·⌊q/p⌋ (mod q)`.
///
/// `plaintext_modulus` is the `p` the message was encoded under. It travels
/// with the ciphertext through modulus and key switching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    a: ModVector,
    b: u64,
    plaintext_modulus: u64,
}

impl Ciphertext {
    /// Wraps a mask and body; `b` is reduced modulo the mask's modulus.
    pub fn new(a: ModVector, b: u64, plaintext_modulus: u64) -> Self {
        let b = a.modulus().reduce(b);
        Self {
            a,
            b,
            plaintext_modulus,
        }
    }

    pub fn a(&self) -> &ModVector {
        &self.a
    }

    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn modulus(&self) -> &Modulus {
        self.a.modulus()
    }

    pub fn dimension(&self) -> usize {
        self.a.len()
    }

    pub fn plaintext_modulus(&self) -> u64 {
        self.plaintext_modulus
    }

    pub fn set_plaintext_modulus(&mut self, p: u64) {
        self.plaintext_modulus = p;
    }

    /// `b - <a, s> mod q` for a secret already expressed under `q`.
    pub fn phase(&self, s: &ModVector) -> u64 {
        self.modulus().sub(self.b, self.a.dot(s))
    }

    /// Rescales every coordinate from the current modulus to `q`.
    ///
    /// Each entry becomes `⌊0.5 + x·q/Q⌋ mod q`; no randomness is involved.
    pub fn mod_switch(&self, q: Modulus) -> Self {
        let big_q = *self.modulus();
        let values = self
            .a
            .iter()
            .map(|&x| round_q_big_q(x, &q, &big_q))
            .collect();
        Self {
            a: ModVector::from_reduced(values, q),
            b: round_q_big_q(self.b, &q, &big_q),
            plaintext_modulus: self.plaintext_modulus,
        }
    }

    pub fn add_const_assign(&mut self, constant: u64) {
        let q = *self.modulus();
        self.b = q.add(self.b, q.reduce(constant));
    }

    pub fn sub_const_assign(&mut self, constant: u64) {
        let q = *self.modulus();
        self.b = q.sub(self.b, q.reduce(constant));
    }

    /// Scales both `a` and `b` by `constant`.
    pub fn mul_const_assign(&mut self, constant: u64) {
        let q = *self.modulus();
        self.a.mul_scalar_assign(constant);
        self.b = q.mul(self.b, q.reduce(constant));
    }

    /// Overwrites `self` with `lhs - self`.
    pub fn rsub_assign(&mut self, lhs: &Ciphertext) {
        assert_eq!(self.modulus(), lhs.modulus(), "rsub_assign: modulus mismatch");
        self.a.rsub_assign(&lhs.a);
        self.b = self.modulus().sub(lhs.b, self.b);
    }
}

impl AddAssign<&Ciphertext> for Ciphertext {
    fn add_assign(&mut self, rhs: &Ciphertext) {
        self.a += &rhs.a;
        self.b = self.modulus().add(self.b, rhs.b);
    }
}

impl SubAssign<&Ciphertext> for Ciphertext {
    fn sub_assign(&mut self, rhs: &Ciphertext) {
        self.a -= &rhs.a;
        self.b = self.modulus().sub(self.b, rhs.b);
    }
}
