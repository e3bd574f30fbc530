//! Blake2b-224 payment credential hash of a verification key.

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};
use ed25519_dalek::PUBLIC_KEY_LENGTH;
use hex::encode as hex_encode;
use std::fmt;

use crate::keys::InvalidInputLength;

type Blake2b224 = Blake2b<U28>;

/// Payment credential hash: Blake2b-224 of the verification key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CredentialHash([u8; PaymentHasher::DIGEST_LENGTH]);

impl CredentialHash {
    /// Wraps an existing 28-byte digest.
    #[must_use]
    pub fn from_bytes(bytes: [u8; PaymentHasher::DIGEST_LENGTH]) -> Self {
        CredentialHash(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PaymentHasher::DIGEST_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex_encode(self.0)
    }
}

impl fmt::Display for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Reduces a verification key to its credential hash.
pub struct PaymentHasher;

impl PaymentHasher {
    /// Blake2b-224 digest length (bytes).
    pub const DIGEST_LENGTH: usize = 28;

    /// Compute Blake2b-224(verification_key).
    ///
    /// # Errors
    /// Returns [`InvalidInputLength`] unless the key is exactly 32 bytes.
    pub fn hash(verification_key: &[u8]) -> Result<CredentialHash, InvalidInputLength> {
        if verification_key.len() != PUBLIC_KEY_LENGTH {
            return Err(InvalidInputLength {
                expected: PUBLIC_KEY_LENGTH,
                got: verification_key.len(),
            });
        }

        let digest = Blake2b224::digest(verification_key);
        let mut out = [0u8; Self::DIGEST_LENGTH];
        out.copy_from_slice(&digest);
        Ok(CredentialHash(out))
    }
}
