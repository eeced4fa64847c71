//! # Key Management
//!
//! Ed25519 keypair generation and wallet-file handling for Strongroom
//! identities.
//!
//! Every participant, vault owner or depositor, is an Ed25519 keypair
//! whose wallet address is the BLAKE3 hash of the verifying key (see
//! [`crate::address`]). Keys are generated from the OS RNG; deterministic
//! construction from a seed exists for tests and key-derivation schemes.
//!
//! ## Wallet files
//!
//! A wallet file is a JSON array of the 64 keypair bytes (secret key
//! followed by public key), the same shape common ledger tooling writes to
//! `~/.config/*/id.json`. Loading re-derives the public half and rejects
//! files where it does not match the stored one.
//!
//! Key bytes are never logged. If you add logging to this module, you
//! will be asked to leave.

use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH};
use rand::rngs::OsRng;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::address::Address;

/// Errors that can occur loading or storing wallet keys.
///
/// Intentionally vague about *why* key material was invalid. Leaking
/// details about secrets through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The wallet file could not be read or written.
    #[error("wallet file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The wallet file is not a JSON array of bytes.
    #[error("malformed wallet file: expected a JSON array of key bytes")]
    Malformed,

    /// The wallet file holds the wrong number of bytes.
    #[error("invalid wallet length: expected {expected} bytes, got {got}")]
    BadLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },

    /// The key bytes do not form a consistent Ed25519 keypair.
    #[error("invalid keypair bytes")]
    InvalidKeypair,
}

/// A Strongroom identity keypair wrapping an Ed25519 signing key.
///
/// Deliberately does **not** implement `Serialize`/`Deserialize`:
/// persisting a private key should be an explicit act via
/// [`write_to_file`](Self::write_to_file), not a side effect of shoving
/// a struct into JSON.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key *is* the seed. A weak seed makes
    /// a weak key; outside of tests, produce seeds with a CSPRNG or KDF.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The public (verifying) half of this keypair.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// The wallet address of this keypair.
    pub fn address(&self) -> Address {
        Address::from_verifying_key(&self.verifying_key())
    }

    /// Hex encoding of the verifying key, for display next to the
    /// Bech32 address.
    pub fn verifying_key_hex(&self) -> String {
        hex::encode(self.verifying_key().as_bytes())
    }

    /// Load a keypair from a wallet file.
    ///
    /// Accepts the 64-byte JSON-array format (secret key || public key)
    /// and validates that the public half matches the secret half.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let raw = std::fs::read_to_string(path)?;
        let bytes: Vec<u8> = serde_json::from_str(&raw).map_err(|_| KeyError::Malformed)?;

        if bytes.len() != KEYPAIR_LENGTH {
            return Err(KeyError::BadLength {
                expected: KEYPAIR_LENGTH,
                got: bytes.len(),
            });
        }

        let mut arr = [0u8; KEYPAIR_LENGTH];
        arr.copy_from_slice(&bytes);
        let signing_key =
            SigningKey::from_keypair_bytes(&arr).map_err(|_| KeyError::InvalidKeypair)?;
        Ok(Self { signing_key })
    }

    /// Write this keypair to a wallet file as a JSON byte array.
    ///
    /// Overwrites an existing file at `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), KeyError> {
        let bytes = self.signing_key.to_keypair_bytes().to_vec();
        let json = serde_json::to_string(&bytes).map_err(|_| KeyError::Malformed)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show the address, never the key material.
        write!(f, "Keypair({})", self.address())
    }
}
