pub mod key_pair;
pub mod public_key;
pub mod secret_key;
pub mod switching_key;

pub use key_pair::KeyPair;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;
pub use switching_key::SwitchingKey;
