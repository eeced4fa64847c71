//! # Share Book — Mint/Burn Service for Vault Shares
//!
//! The share book is the mint-and-burn primitive the vault engine issues
//! proportional-share tokens through. Each vault controls exactly one
//! mint, created at vault registration and addressed deterministically
//! from the vault owner's identity (see [`crate::address::derive_address`]).
//!
//! ## Security model
//!
//! - **Mint gating**: minting requires the mint's recorded authority.
//!   Caller-side authorization (who may trigger a mint at all) is the
//!   engine's job; the book only enforces that the engine mints through
//!   the right authority account.
//! - **Burn scope**: burns are debited from a named holder and can never
//!   exceed that holder's balance. There is no admin burn.
//! - **Supply tracking**: total supply and per-holder balances are kept
//!   consistent; every arithmetic step is checked. Wrapping arithmetic
//!   and money do not mix.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::address::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during share book operations.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The referenced mint has not been created.
    #[error("unknown share mint: {0}")]
    UnknownMint(Address),

    /// A mint already exists at this address.
    #[error("share mint already exists: {0}")]
    MintExists(Address),

    /// The given authority does not control this mint.
    #[error("wrong mint authority for {mint}")]
    WrongAuthority {
        /// The mint being operated on.
        mint: Address,
    },

    /// Minting this quantity would overflow the total supply.
    #[error("supply overflow: minting {qty} shares would exceed u64::MAX")]
    SupplyOverflow {
        /// The quantity that was attempted.
        qty: u64,
    },

    /// A burn exceeds the holder's share balance.
    #[error("insufficient shares: holder has {balance}, tried to burn {qty}")]
    InsufficientShares {
        /// Current balance of the holder.
        balance: u64,
        /// Quantity the caller tried to burn.
        qty: u64,
    },
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Supply and control record for one share mint.
///
/// Shares are whole units: no decimals, no fractional shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareMint {
    /// The account allowed to mint and burn through this mint.
    pub authority: Address,
    /// Current total supply in whole shares.
    pub supply: u64,
}

/// The share book: tracks every mint's supply and every holder's balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareBook {
    /// Registered mints keyed by their derived address.
    mints: HashMap<Address, ShareMint>,
    /// Per-mint, per-holder balances: `mint -> (holder -> shares)`.
    balances: HashMap<Address, HashMap<Address, u64>>,
}

impl ShareBook {
    /// Create a new, empty share book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new mint with zero supply under the given authority.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::MintExists`] if the address is taken.
    pub fn create_mint(&mut self, mint: Address, authority: Address) -> Result<(), ShareError> {
        if self.mints.contains_key(&mint) {
            return Err(ShareError::MintExists(mint));
        }
        self.mints.insert(
            mint,
            ShareMint {
                authority,
                supply: 0,
            },
        );
        self.balances.insert(mint, HashMap::new());
        Ok(())
    }

    /// Whether a mint exists at this address.
    pub fn mint_exists(&self, mint: &Address) -> bool {
        self.mints.contains_key(mint)
    }

    /// Check that a mint operation would succeed, without performing it.
    pub fn ensure_mint_to(
        &self,
        mint: &Address,
        authority: &Address,
        to: &Address,
        qty: u64,
    ) -> Result<(), ShareError> {
        let record = self
            .mints
            .get(mint)
            .ok_or(ShareError::UnknownMint(*mint))?;
        if record.authority != *authority {
            return Err(ShareError::WrongAuthority { mint: *mint });
        }
        record
            .supply
            .checked_add(qty)
            .ok_or(ShareError::SupplyOverflow { qty })?;
        self.balance_of(mint, to)
            .checked_add(qty)
            .ok_or(ShareError::SupplyOverflow { qty })?;
        Ok(())
    }

    /// Mint shares to a holder. Returns the new total supply.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::UnknownMint`] for an unregistered mint,
    /// [`ShareError::WrongAuthority`] if `authority` does not control it,
    /// and [`ShareError::SupplyOverflow`] if supply or the holder balance
    /// would overflow. Nothing is mutated on error.
    pub fn mint_to(
        &mut self,
        mint: &Address,
        authority: &Address,
        to: &Address,
        qty: u64,
    ) -> Result<u64, ShareError> {
        self.ensure_mint_to(mint, authority, to, qty)?;

        // Checked above; the two adds cannot fail now.
        let record = self
            .mints
            .get_mut(mint)
            .ok_or(ShareError::UnknownMint(*mint))?;
        record.supply += qty;
        let supply = record.supply;

        let holder_balance = self
            .balances
            .entry(*mint)
            .or_default()
            .entry(*to)
            .or_insert(0);
        *holder_balance += qty;

        Ok(supply)
    }

    /// Check that a burn operation would succeed, without performing it.
    pub fn ensure_burn_from(
        &self,
        mint: &Address,
        from: &Address,
        qty: u64,
    ) -> Result<(), ShareError> {
        if !self.mints.contains_key(mint) {
            return Err(ShareError::UnknownMint(*mint));
        }
        let balance = self.balance_of(mint, from);
        if balance < qty {
            return Err(ShareError::InsufficientShares { balance, qty });
        }
        Ok(())
    }

    /// Burn shares from a holder. Returns the new total supply.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::UnknownMint`] for an unregistered mint and
    /// [`ShareError::InsufficientShares`] if the holder balance is too
    /// small. Nothing is mutated on error.
    pub fn burn_from(&mut self, mint: &Address, from: &Address, qty: u64) -> Result<u64, ShareError> {
        self.ensure_burn_from(mint, from, qty)?;

        if let Some(balances) = self.balances.get_mut(mint) {
            if let Some(balance) = balances.get_mut(from) {
                *balance -= qty;
            }
        }
        let record = self
            .mints
            .get_mut(mint)
            .ok_or(ShareError::UnknownMint(*mint))?;
        // Supply can never be less than any single holder's balance.
        record.supply = record.supply.saturating_sub(qty);
        Ok(record.supply)
    }

    /// Total supply of a mint, 0 if it does not exist.
    pub fn total_supply(&self, mint: &Address) -> u64 {
        self.mints.get(mint).map(|m| m.supply).unwrap_or(0)
    }

    /// Share balance of `holder` for the given mint, 0 if absent.
    pub fn balance_of(&self, mint: &Address, holder: &Address) -> u64 {
        self.balances
            .get(mint)
            .and_then(|b| b.get(holder))
            .copied()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
