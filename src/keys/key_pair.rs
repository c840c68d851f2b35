use super::{PublicKey, SecretKey};

/// A public key together with the secret it was derived from.
///
/// The public half may be handed out; the secret half stays with its owner.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl KeyPair {
    pub fn new(public_key: PublicKey, secret_key: SecretKey) -> Self {
        Self {
            public_key,
            secret_key,
        }
    }

    pub fn into_parts(self) -> (PublicKey, SecretKey) {
        (self.public_key, self.secret_key)
    }
}
