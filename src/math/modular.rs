use crate::crypto::errors::{LweError, LweResult};

/// Largest supported modulus (exclusive). Keeps every Barrett intermediate
/// inside `u128`.
pub const MAX_MODULUS: u64 = 1 << 62;

/// A word-sized modulus with a precomputed Barrett reduction constant.
///
/// Reduction follows the classical Barrett scheme with `b = 2`: for a modulus
/// of bit length `k`, `mu = floor(2^(2k) / q)` and any `x < 2^(2k)` is reduced
/// with two shifts, one multiplication and at most two corrective
/// subtractions. Products of two reduced values always satisfy the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modulus {
    value: u64,
    bits: u32,
    mu: u128,
}

impl Modulus {
    pub fn new(value: u64) -> LweResult<Self> {
        if !(2..MAX_MODULUS).contains(&value) {
            return Err(LweError::InvalidModulus { modulus: value });
        }
        let bits = u64::BITS - value.leading_zeros();
        let mu = (1u128 << (2 * bits)) / value as u128;
        Ok(Self { value, bits, mu })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn mu(&self) -> u128 {
        self.mu
    }

    /// Barrett reduction of `x < 2^(2k)`.
    #[inline]
    pub fn reduce_wide(&self, x: u128) -> u64 {
        debug_assert!(x < 1u128 << (2 * self.bits));
        let q = self.value as u128;
        let estimate = ((x >> (self.bits - 1)) * self.mu) >> (self.bits + 1);
        let mut r = x - estimate * q;
        while r >= q {
            r -= q;
        }
        r as u64
    }

    #[inline]
    pub fn reduce(&self, x: u64) -> u64 {
        x % self.value
    }

    /// Maps a signed integer into `[0, q)`.
    #[inline]
    pub fn reduce_signed(&self, x: i64) -> u64 {
        (x as i128).rem_euclid(self.value as i128) as u64
    }

    #[inline]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let sum = a + b;
        if sum >= self.value { sum - self.value } else { sum }
    }

    #[inline]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b { a - b } else { a + self.value - b }
    }

    #[inline]
    pub fn neg(&self, a: u64) -> u64 {
        if a == 0 { 0 } else { self.value - a }
    }

    /// Modular product of two reduced operands.
    #[inline]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.reduce_wide(a as u128 * b as u128)
    }

    /// Centered representative in `(-q/2, q/2]`.
    #[inline]
    pub fn center(&self, a: u64) -> i64 {
        if a > self.value / 2 {
            a as i64 - self.value as i64
        } else {
            a as i64
        }
    }

    /// Reinterprets a residue of `from` under `self`, keeping its sign.
    #[inline]
    pub fn switch_from(&self, a: u64, from: &Modulus) -> u64 {
        self.reduce_signed(from.center(a))
    }
}

/// Scales `v` from modulus `big_q` to modulus `q`: `floor(0.5 + v·q/Q) mod q`.
///
/// Evaluated as `floor((2·v·q + Q) / (2·Q))` so the rounding is exact for
/// every input.
pub fn round_q_big_q(v: u64, q: &Modulus, big_q: &Modulus) -> u64 {
    let numerator = 2 * v as u128 * q.value() as u128 + big_q.value() as u128;
    let rounded = numerator / (2 * big_q.value() as u128);
    (rounded % q.value() as u128) as u64
}
