use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LweError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("modulus {modulus} is outside the supported range [2, 2^62)")]
    InvalidModulus { modulus: u64 },

    #[error("ciphertext modulus {modulus} must be divisible by {divisor}")]
    NotDivisible { modulus: u64, divisor: u64 },

    #[error("share list must contain at least one element")]
    EmptyShares,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Modulus mismatch: expected {expected}, got {actual}")]
    ModulusMismatch { expected: u64, actual: u64 },
}

pub type LweResult<T> = Result<T, LweError>;
