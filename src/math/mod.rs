pub mod modular;
pub mod sampling;
pub mod vector;

pub use modular::{MAX_MODULUS, Modulus, round_q_big_q};
pub use sampling::{
    fork_rngs, gaussian_scalar, gaussian_vector, ternary_vector, uniform_vector,
};
pub use vector::ModVector;
