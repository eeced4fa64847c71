//! # Share Ledger — Fixed-Rate Adapter
//!
//! Bridges the vault engine to the share-mint service, converting between
//! grain amounts and whole share quantities at the fixed protocol rate
//! ([`SHARE_PRICE_GRAINS`]). All issuance and redemption of vault shares
//! flows through this adapter, so the conversion is applied in exactly
//! one place.
//!
//! The conversion is intentionally dumb: `amount / price`, no rounding
//! policy needed because the engine only ever passes exact multiples of
//! the share price (it rejects everything else before reaching here).

use strongroom_ledger::address::Address;
use strongroom_ledger::shares::{ShareBook, ShareError};

use crate::params::SHARE_PRICE_GRAINS;

/// Number of shares a grain amount converts to at the fixed rate.
pub fn shares_for_amount(amount: u64) -> u64 {
    amount / SHARE_PRICE_GRAINS
}

/// Whether a grain amount is an exact multiple of the share price.
pub fn is_share_multiple(amount: u64) -> bool {
    amount % SHARE_PRICE_GRAINS == 0
}

/// Grain value of a share quantity at the fixed rate, `None` on overflow.
pub fn amount_for_shares(qty: u64) -> Option<u64> {
    qty.checked_mul(SHARE_PRICE_GRAINS)
}

/// Mint/burn adapter bound to a share book.
///
/// Exposes the engine's two share movements (issue on deposit, redeem
/// on withdrawal) plus their pure preflight checks so the engine can
/// validate before its first mutation.
pub struct ShareLedger<'a> {
    book: &'a mut ShareBook,
}

impl<'a> ShareLedger<'a> {
    /// Bind the adapter to a share book.
    pub fn new(book: &'a mut ShareBook) -> Self {
        Self { book }
    }

    /// Check that issuing shares for `amount` grains would succeed.
    /// Returns the share quantity that would be minted.
    pub fn ensure_issue(
        &self,
        mint: &Address,
        authority: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<u64, ShareError> {
        let qty = shares_for_amount(amount);
        self.book.ensure_mint_to(mint, authority, to, qty)?;
        Ok(qty)
    }

    /// Mint the shares for `amount` grains to a depositor.
    /// Returns the quantity minted.
    pub fn issue(
        &mut self,
        mint: &Address,
        authority: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<u64, ShareError> {
        let qty = shares_for_amount(amount);
        self.book.mint_to(mint, authority, to, qty)?;
        Ok(qty)
    }

    /// Check that redeeming the shares behind `amount` grains would
    /// succeed. Returns the share quantity that would be burned.
    pub fn ensure_redeem(
        &self,
        mint: &Address,
        from: &Address,
        amount: u64,
    ) -> Result<u64, ShareError> {
        let qty = shares_for_amount(amount);
        self.book.ensure_burn_from(mint, from, qty)?;
        Ok(qty)
    }

    /// Burn the shares behind `amount` grains from a depositor.
    /// Returns the quantity burned.
    pub fn redeem(
        &mut self,
        mint: &Address,
        from: &Address,
        amount: u64,
    ) -> Result<u64, ShareError> {
        let qty = shares_for_amount(amount);
        self.book.burn_from(mint, from, qty)?;
        Ok(qty)
    }
}
