//! Signing secret.

use rand::Rng;

use super::constants::{SECRET_KEY_CHARSET, SECRET_KEY_LENGTH};

/// Secret used to sign sessions and tokens. Never printed or serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// A fresh random key.
    pub fn generate() -> Self {
        Self(generate_secret_key())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Generate a random secret key.
pub fn generate_secret_key() -> String {
    let mut rng = rand::thread_rng();
    (0..SECRET_KEY_LENGTH)
        .map(|_| SECRET_KEY_CHARSET[rng.gen_range(0..SECRET_KEY_CHARSET.len())] as char)
        .collect()
}
