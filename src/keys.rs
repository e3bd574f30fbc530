//! Ed25519 payment key pairs.
//!
//! A key pair is derived from 32 bytes of seed material drawn fresh from the
//! operating system on every call. The seed is wiped once the signing key has
//! been built from it.

use ed25519_dalek::{SECRET_KEY_LENGTH, SigningKey, VerifyingKey};
use hex::encode as hex_encode;
use log::{debug, warn};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// The entropy source could not supply seed material.
#[derive(Error, Debug)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(#[from] rand::Error);

/// Input had the wrong number of bytes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid input length: expected {expected}, got {got}")]
pub struct InvalidInputLength {
    pub expected: usize,
    pub got: usize,
}

/// An Ed25519 signing key and the verification key derived from it.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    verification_key: VerifyingKey,
}

impl KeyPair {
    /// Generates a fresh key pair from the operating system's CSPRNG.
    ///
    /// # Errors
    /// Returns [`EntropyError`] if the OS entropy source fails.
    pub fn generate() -> Result<Self, EntropyError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generates a fresh key pair from `rng`.
    ///
    /// # Errors
    /// Returns [`EntropyError`] if `rng` cannot fill the seed.
    pub fn generate_with<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, EntropyError> {
        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        if let Err(e) = rng.try_fill_bytes(&mut seed[..]) {
            warn!("key generation aborted: {e}");
            return Err(e.into());
        }

        let pair = Self::from_seed(&seed);
        debug!(
            "generated key pair, verification key {}",
            pair.verification_key_hex()
        );
        Ok(pair)
    }

    /// Derives the key pair for a 32-byte Ed25519 seed.
    #[must_use]
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verification_key = signing_key.verifying_key();
        Self {
            signing_key,
            verification_key,
        }
    }

    #[must_use]
    pub fn verification_key(&self) -> &VerifyingKey {
        &self.verification_key
    }

    #[must_use]
    pub fn verification_key_bytes(&self) -> &[u8; 32] {
        self.verification_key.as_bytes()
    }

    /// The verification key as 64 lowercase hex characters.
    #[must_use]
    pub fn verification_key_hex(&self) -> String {
        hex_encode(self.verification_key.as_bytes())
    }

    /// The signing key seed as 64 lowercase hex characters.
    #[must_use]
    pub fn signing_key_hex(&self) -> String {
        hex_encode(self.signing_key.as_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("signing_key", &"<redacted>")
            .field("verification_key", &self.verification_key_hex())
            .finish()
    }
}

/// Generates a fresh payment key pair.
///
/// # Errors
/// Returns [`EntropyError`] if the OS entropy source fails.
pub fn generate_key_pair() -> Result<KeyPair, EntropyError> {
    KeyPair::generate()
}
