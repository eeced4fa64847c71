// Copyright (c) 2026 Strongroom Labs. MIT License.
// See LICENSE for details.

//! # Strongroom Ledger — Substrate Library
//!
//! The substrate the Strongroom vault engine runs on: deterministic
//! account addressing, wallet keys, the base-value account book, the
//! share-mint book, and embedded persistence.
//!
//! This crate deliberately contains no vault policy. It answers "where
//! do accounts live and how does value move", never "who may move it".
//! Authorization and lock rules belong to `strongroom-vault`, which
//! drives these services through explicit handles.
//!
//! ## Modules
//!
//! - **address** — 32-byte identifiers, Bech32 display, tag-based derivation.
//! - **keys** — Ed25519 wallet keypairs and wallet-file I/O.
//! - **coins** — grain balances and the transfer primitive.
//! - **shares** — share mints: create, mint, burn, supply tracking.
//! - **store** — sled-backed persistence with bincode values.
//!
//! ## Design Philosophy
//!
//! 1. All monetary arithmetic is checked, because wrapping and money do
//!    not mix.
//! 2. Every state mutation validates first, mutates after: a returned
//!    error means nothing changed.
//! 3. Every public state type is serializable for snapshotting.

pub mod address;
pub mod coins;
pub mod keys;
pub mod shares;
pub mod store;

pub use address::{derive_address, Address, AddressError};
pub use coins::{CoinError, CoinLedger};
pub use keys::{KeyError, Keypair};
pub use shares::{ShareBook, ShareError, ShareMint};
pub use store::{Store, StoreError, StoreResult};
