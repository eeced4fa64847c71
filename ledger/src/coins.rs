//! # Coin Ledger — Base-Value Accounts
//!
//! The coin ledger is the value-transfer service: a flat map from
//! [`Address`] to grain balance. All amounts are `u64` grains
//! (10^9 grains = 1 STRG); no floating point, no decimals in arithmetic.
//!
//! ## State transition
//!
//! A transfer `from -> to` for amount `A`:
//!
//! 1. Verify `balance(from) >= A`.
//! 2. Verify `balance(to) + A` does not overflow.
//! 3. `balance(from) -= A`
//! 4. `balance(to) += A`
//!
//! Both sides commit together or not at all; a failed check mutates
//! nothing. The pure check is also exposed as
//! [`ensure_transfer`](CoinLedger::ensure_transfer) so callers composing
//! multi-step operations can front-load every precondition before their
//! first mutation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::address::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during coin ledger operations.
#[derive(Debug, Error)]
pub enum CoinError {
    /// The debited account does not hold enough grains.
    #[error("insufficient funds: have {have} grains, need {need}")]
    InsufficientFunds {
        /// Current balance of the debited account.
        have: u64,
        /// Amount the operation required.
        need: u64,
    },

    /// Crediting the recipient would overflow its balance.
    ///
    /// Hitting this means someone holds close to 18.4 quintillion grains.
    /// That's either a bug or an attack.
    #[error("balance overflow: current {current}, credit {credit}")]
    BalanceOverflow {
        /// The balance before the failed credit.
        current: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },
}

// ---------------------------------------------------------------------------
// CoinLedger
// ---------------------------------------------------------------------------

/// In-memory account book mapping addresses to grain balances.
///
/// Accounts are implicit: an address with no entry has balance 0, and an
/// entry appears on first credit. Serializable so the whole book can be
/// snapshotted to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinLedger {
    /// Grain balances keyed by account address.
    balances: HashMap<Address, u64>,
}

impl CoinLedger {
    /// Create a new, empty coin ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an account, 0 if it has never been credited.
    pub fn balance_of(&self, addr: &Address) -> u64 {
        self.balances.get(addr).copied().unwrap_or(0)
    }

    /// Credit an account out of thin air.
    ///
    /// This is the provisioning path for a local deployment, standing in
    /// for the faucet the original environment relied on. Returns the new
    /// balance.
    pub fn credit(&mut self, addr: &Address, amount: u64) -> Result<u64, CoinError> {
        let current = self.balance_of(addr);
        let updated = current.checked_add(amount).ok_or(CoinError::BalanceOverflow {
            current,
            credit: amount,
        })?;
        self.balances.insert(*addr, updated);
        Ok(updated)
    }

    /// Check that a transfer would succeed, without performing it.
    pub fn ensure_transfer(&self, from: &Address, to: &Address, amount: u64) -> Result<(), CoinError> {
        let have = self.balance_of(from);
        if have < amount {
            return Err(CoinError::InsufficientFunds { have, need: amount });
        }
        if from != to {
            let current = self.balance_of(to);
            current
                .checked_add(amount)
                .ok_or(CoinError::BalanceOverflow {
                    current,
                    credit: amount,
                })?;
        }
        Ok(())
    }

    /// Move grains between accounts.
    ///
    /// A self-transfer is a checked no-op. On any error the ledger is
    /// unchanged.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u64) -> Result<(), CoinError> {
        self.ensure_transfer(from, to, amount)?;
        if from == to {
            return Ok(());
        }
        // Checks above guarantee these cannot underflow or overflow.
        let debited = self.balance_of(from) - amount;
        let credited = self.balance_of(to) + amount;
        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }

    /// Total grains issued across all accounts.
    ///
    /// `u128` because the sum of many `u64` balances can exceed `u64`.
    pub fn total_issued(&self) -> u128 {
        self.balances.values().map(|b| *b as u128).sum()
    }

    /// Number of accounts with a ledger entry.
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
