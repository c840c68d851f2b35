//! LWE engine: parameters, key generation, encryption, switching and
//! threshold decryption.
//!
//! Every operation is a method on [`LweEngine`]; the methods are grouped by
//! concern across the submodules.

pub mod builder;
pub mod encryption;
pub mod engine;
pub mod errors;
pub mod key_switch;
pub mod operations;
pub mod params;
pub mod threshold;

pub use builder::LweEngineBuilder;
pub use encryption::EMBEDDING_PLAINTEXT_MODULUS;
pub use engine::LweEngine;
pub use errors::{LweError, LweResult};
pub use params::{KeyDistribution, LweParams};
