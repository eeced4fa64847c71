//! # Addresses — Deterministic Account Identifiers
//!
//! Every account the ledger touches (wallets, vault state records, share
//! mints, depositor positions) is identified by a 32-byte [`Address`].
//! Wallet addresses are derived from an Ed25519 verifying key via BLAKE3;
//! system accounts are derived from a domain tag plus one or more parent
//! addresses via [`derive_address`]:
//!
//! ```text
//! verifying_key (32 bytes) -> BLAKE3(key)           -> wallet address
//! (tag, seed addresses)    -> BLAKE3_derive_key(tag, seeds) -> system address
//! ```
//!
//! The human-facing form is Bech32 with the `strg` prefix
//! (`strg1qw508d6qe...`). Bech32's checksum catches up to four character
//! errors, which matters when operators copy-paste addresses between
//! terminals.
//!
//! ## Why derive instead of allocate?
//!
//! Derivation makes addressing a pure function: any party holding the same
//! identities computes the same account address, with no lookup table to
//! keep consistent. BLAKE3's `derive_key` mode gives each tag its own
//! internal IV, so two different tags can never produce colliding
//! addresses: not "unlikely", impossible by construction. Seeds are all
//! exactly 32 bytes, so their concatenation is unambiguous without length
//! prefixes.

use bech32::{Bech32, Hrp};
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The human-readable prefix for all Strongroom addresses.
const ADDRESS_HRP: &str = "strg";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while parsing an address string.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The Bech32 string could not be decoded.
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// The decoded address has an unexpected human-readable prefix.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp {
        /// The expected HRP.
        expected: String,
        /// The HRP that was actually found.
        got: String,
    },

    /// The decoded data has an unexpected length.
    #[error("invalid address data length: expected {expected} bytes, got {got}")]
    InvalidDataLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte account identifier.
///
/// `Address` is `Copy` and ordered so it can key `HashMap`s and sorted
/// trees without ceremony. Display and `FromStr` use the Bech32 form.
///
/// # Examples
///
/// ```
/// use strongroom_ledger::keys::Keypair;
/// use strongroom_ledger::address::Address;
///
/// let kp = Keypair::generate();
/// let addr = kp.address();
/// assert!(addr.to_string().starts_with("strg1"));
///
/// let parsed: Address = addr.to_string().parse().unwrap();
/// assert_eq!(addr, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Construct an address from raw bytes. Used by derivation and tests;
    /// external input should come through [`FromStr`] so it is checksummed.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive the wallet address for an Ed25519 verifying key.
    ///
    /// The BLAKE3 indirection keeps addresses a uniform 32 bytes and
    /// decouples the address format from the key scheme.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(*blake3::hash(key.as_bytes()).as_bytes())
    }

    /// The raw 32 bytes underlying this address.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encode this address as a Bech32 string with the `strg` prefix.
    pub fn to_bech32(&self) -> String {
        let hrp = Hrp::parse(ADDRESS_HRP).expect("static HRP is valid");
        bech32::encode::<Bech32>(hrp, &self.0)
            .expect("encoding a 32-byte payload should never fail")
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Parse a Bech32-encoded address. Validates the HRP, checksum, and
    /// data length.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data) =
            bech32::decode(s).map_err(|e| AddressError::Bech32Decode(e.to_string()))?;

        let expected_hrp = Hrp::parse(ADDRESS_HRP).expect("static HRP is valid");
        if hrp != expected_hrp {
            return Err(AddressError::InvalidHrp {
                expected: ADDRESS_HRP.to_string(),
                got: hrp.to_string(),
            });
        }

        if data.len() != 32 {
            return Err(AddressError::InvalidDataLength {
                expected: 32,
                got: data.len(),
            });
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&data);
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bech32())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_bech32())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != 32 {
                return Err(serde::de::Error::custom(format!(
                    "expected 32-byte address, got {}",
                    bytes.len()
                )));
            }
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes);
            Ok(Address(arr))
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive a system account address from a domain tag and seed addresses.
///
/// Uses BLAKE3's `derive_key` mode with `tag` as the context string, fed
/// with the concatenated seed bytes. The same `(tag, seeds)` pair always
/// produces the same address; distinct tags produce disjoint address
/// spaces by construction.
///
/// Callers must use the identical tag for every read and write of an
/// account; the tag string is part of the account's identity.
pub fn derive_address(tag: &str, seeds: &[&Address]) -> Address {
    let mut hasher = blake3::Hasher::new_derive_key(tag);
    for seed in seeds {
        hasher.update(seed.as_bytes());
    }
    Address(*hasher.finalize().as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
