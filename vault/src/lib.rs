//! # Strongroom Vault Engine
//!
//! The state-transition and invariant-enforcement core of the Strongroom
//! pooled custody ledger. An administrator opens a vault that accepts
//! grains from registered depositors, time-locks each deposit, and
//! represents each depositor's claim as vault shares minted at a fixed
//! exchange rate. The owner can retune lock and minimum-deposit rules
//! and move pooled funds out administratively.
//!
//! - **engine** — the six operations and their atomicity discipline.
//! - **state** — the vault and position records, and their addressing.
//! - **access** — role predicates (owner, registered depositor).
//! - **lock** — lock-window arithmetic.
//! - **shares** — fixed-rate bridge to the share-mint service.
//! - **params** — protocol constants.
//! - **error** — the typed failure taxonomy.
//!
//! ## Design Principles
//!
//! 1. All monetary operations are checked, because wrapping arithmetic
//!    and money do not mix.
//! 2. Validate everything, then mutate: a typed failure never leaves
//!    partial state.
//! 3. Collaborators and the clock are explicit parameters; no ambient
//!    provider, no hidden singletons.
//! 4. Every public state type is serializable for wire transport and
//!    persistent storage.

pub mod access;
pub mod engine;
pub mod error;
pub mod lock;
pub mod params;
pub mod shares;
pub mod state;

pub use engine::{DepositReceipt, VaultEngine, WithdrawReceipt};
pub use error::VaultError;
pub use state::{DepositorPosition, PositionStatus, VaultAccount};
