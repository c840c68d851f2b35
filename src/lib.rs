//! Learning-With-Errors encryption layer for FHEW-style schemes.
//!
//! Provides secret and public-key LWE encryption, modulus switching, gadget
//! key switching from a large `N`-dimensional key down to a small
//! `n`-dimensional one, additive multiparty key generation and threshold
//! decryption.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use toy_lwe_fhe::LweEngine;
//!
//! let engine = LweEngine::builder().build().unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//! let sk = engine.generate_secret_key(&mut rng);
//! let q = engine.params().q();
//! let ct = engine.encrypt(&sk, 3, 4, q, &mut rng).unwrap();
//! assert_eq!(engine.decrypt(&sk, &ct, 4).unwrap(), 3);
//! ```
pub mod ciphertext;
pub mod crypto;
pub mod keys;
pub mod math;

pub use ciphertext::{Ciphertext, LwePlaintext};
pub use crypto::{KeyDistribution, LweEngine, LweEngineBuilder, LweError, LweParams, LweResult};
pub use keys::{KeyPair, PublicKey, SecretKey, SwitchingKey};
pub use math::{ModVector, Modulus};
