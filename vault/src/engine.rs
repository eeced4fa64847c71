//! # Vault Engine
//!
//! The authoritative state-transition engine for pooled custody vaults.
//! Six operations exist: register a vault, register a depositor, the two
//! deposit paths, withdrawal, and the owner's administrative transfer and
//! settings update. The engine decides whether each call is legal, and
//! how it mutates the persisted records; nothing else in the system
//! writes vault state.
//!
//! ## Atomicity
//!
//! Every operation validates all of its preconditions (role checks,
//! amount rules, lock state, checked arithmetic, and the collaborators'
//! own preflights) before its first mutation. A returned error therefore
//! never leaves partial state: no deposit with the balance updated but
//! the mint skipped, no withdrawal with the transfer sent but the
//! position still showing a locked balance. Operations assume the
//! single-writer discipline of the surrounding substrate; the engine
//! performs no internal concurrency.
//!
//! ## The fixed share price is load-bearing
//!
//! Shares are minted and redeemed at [`SHARE_PRICE_GRAINS`] regardless of
//! the vault's actual balance. Combined with the owner's unrestricted
//! administrative transfer, this means the owner can move out grains that
//! nominally back outstanding shares; affected depositors then hit
//! [`VaultError::InsufficientVaultBalance`] at withdrawal time while
//! their shares remain priced at the fixed rate. This is the protocol's
//! documented trust model, not an accounting bug. Do not "fix" it by
//! repricing shares against solvency.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use strongroom_ledger::address::Address;
use strongroom_ledger::coins::CoinLedger;
use strongroom_ledger::shares::ShareBook;

use crate::access;
use crate::error::VaultError;
use crate::lock;
use crate::params::{DEFAULT_LOCK_PERIOD_SECS, DEFAULT_MIN_DEPOSIT_GRAINS, SHARE_PRICE_GRAINS};
use crate::shares::{is_share_multiple, ShareLedger};
use crate::state::{
    position_address, share_mint_address, vault_state_address, DepositorPosition, VaultAccount,
};

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

/// Result of a successful depositor deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    /// Vault balance after the deposit.
    pub vault_balance: u64,
    /// The position's total locked grains after the deposit.
    pub locked_amount: u64,
    /// Shares minted for this deposit.
    pub shares_minted: u64,
    /// The new unlock timestamp covering the entire locked balance.
    pub unlock_time: i64,
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    /// Grains paid out to the depositor.
    pub amount: u64,
    /// Shares burned against the payout.
    pub shares_burned: u64,
    /// Vault balance after the withdrawal.
    pub vault_balance: u64,
}

// ---------------------------------------------------------------------------
// VaultEngine
// ---------------------------------------------------------------------------

/// The vault state-transition engine.
///
/// Owns every [`VaultAccount`] and [`DepositorPosition`], keyed by their
/// derived addresses. Collaborators (the coin ledger and share book)
/// are passed into each operation explicitly; the engine holds no
/// ambient handles and no clock. Callers supply `now` as unix seconds
/// where time matters, which keeps lock behavior fully testable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultEngine {
    /// Vault records keyed by derived vault state address.
    vaults: HashMap<Address, VaultAccount>,
    /// Position records keyed by derived position address.
    positions: HashMap<Address, DepositorPosition>,
}

impl VaultEngine {
    /// Create an engine with no vaults.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Reads --------------------------------------------------------------

    /// The vault registered by `owner`, if any.
    pub fn vault(&self, owner: &Address) -> Option<&VaultAccount> {
        self.vaults.get(&vault_state_address(owner))
    }

    /// The position of `depositor` in `vault_owner`'s vault, if any.
    pub fn position(&self, depositor: &Address, vault_owner: &Address) -> Option<&DepositorPosition> {
        self.positions.get(&position_address(depositor, vault_owner))
    }

    /// All positions registered in `vault_owner`'s vault.
    pub fn positions_for<'a>(
        &'a self,
        vault_owner: &'a Address,
    ) -> impl Iterator<Item = &'a DepositorPosition> {
        self.positions
            .values()
            .filter(move |p| p.vault_owner == *vault_owner)
    }

    /// Number of registered vaults.
    pub fn vault_count(&self) -> usize {
        self.vaults.len()
    }

    // -- Operations ---------------------------------------------------------

    /// Register a vault for `caller`.
    ///
    /// Creates the vault record at its derived address with a zero
    /// balance and default settings, and creates the vault's share mint
    /// with the vault state account as mint authority.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AlreadyRegistered`] if `caller` already has
    /// a vault. Share-mint creation failures pass through unmodified.
    pub fn register(
        &mut self,
        shares: &mut ShareBook,
        caller: Address,
    ) -> Result<VaultAccount, VaultError> {
        let vault_addr = vault_state_address(&caller);
        if self.vaults.contains_key(&vault_addr) {
            return Err(VaultError::AlreadyRegistered);
        }

        let mint = share_mint_address(&caller);
        shares.create_mint(mint, vault_addr)?;

        let vault = VaultAccount {
            owner: caller,
            share_mint: mint,
            balance: 0,
            lock_period: DEFAULT_LOCK_PERIOD_SECS,
            min_deposit: DEFAULT_MIN_DEPOSIT_GRAINS,
        };
        self.vaults.insert(vault_addr, vault.clone());
        Ok(vault)
    }

    /// Register `caller` as a depositor in `vault_owner`'s vault.
    ///
    /// Creates the position record at its derived address with all
    /// numeric fields zero.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::VaultNotFound`] if no such vault exists and
    /// [`VaultError::AlreadyRegistered`] if the position already does.
    pub fn register_depositor(
        &mut self,
        caller: Address,
        vault_owner: Address,
    ) -> Result<DepositorPosition, VaultError> {
        if !self.vaults.contains_key(&vault_state_address(&vault_owner)) {
            return Err(VaultError::VaultNotFound);
        }

        let position_addr = position_address(&caller, &vault_owner);
        if self.positions.contains_key(&position_addr) {
            return Err(VaultError::AlreadyRegistered);
        }

        let position = DepositorPosition::new(caller, vault_owner);
        self.positions.insert(position_addr, position.clone());
        Ok(position)
    }

    /// Owner-funded deposit into the caller's own vault.
    ///
    /// Grows the pool without minting shares: this is the path for
    /// owner-supplied liquidity, not a depositor claim. Returns the new
    /// vault balance.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::VaultNotFound`] if the caller has no vault,
    /// [`VaultError::ZeroDeposit`] for a zero amount, and
    /// [`VaultError::BelowMinimumDeposit`] below the configured minimum.
    /// Transfer failures pass through unmodified.
    pub fn deposit(
        &mut self,
        coins: &mut CoinLedger,
        caller: Address,
        amount: u64,
    ) -> Result<u64, VaultError> {
        let vault_addr = vault_state_address(&caller);
        let vault = self
            .vaults
            .get(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        access::require_owner(vault, &caller)?;

        if amount == 0 {
            return Err(VaultError::ZeroDeposit);
        }
        if amount < vault.min_deposit {
            return Err(VaultError::BelowMinimumDeposit {
                amount,
                min_deposit: vault.min_deposit,
            });
        }
        let new_balance = vault
            .balance
            .checked_add(amount)
            .ok_or(VaultError::AmountOverflow)?;

        coins.transfer(&caller, &vault_addr, amount)?;

        let vault = self
            .vaults
            .get_mut(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        vault.balance = new_balance;
        Ok(new_balance)
    }

    /// Depositor deposit: lock grains and mint shares.
    ///
    /// Transfers `amount` into the vault, adds it to the position's
    /// locked balance, and restarts the lock clock: the new unlock time
    /// covers the *entire* accumulated locked balance, not just this
    /// increment. Mints `amount / SHARE_PRICE_GRAINS` shares to the
    /// depositor.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::VaultNotFound`] / [`VaultError::PositionNotFound`]
    /// for missing records, [`VaultError::Unauthorized`] if the position
    /// belongs to someone else, [`VaultError::ZeroDeposit`],
    /// [`VaultError::InvalidDepositAmount`] for non-multiples of the
    /// share price, and [`VaultError::BelowMinimumDeposit`] below the
    /// vault minimum. Substrate failures pass through unmodified.
    pub fn deposit_by_depositor(
        &mut self,
        coins: &mut CoinLedger,
        shares: &mut ShareBook,
        caller: Address,
        vault_owner: Address,
        amount: u64,
        now: i64,
    ) -> Result<DepositReceipt, VaultError> {
        let vault_addr = vault_state_address(&vault_owner);
        let position_addr = position_address(&caller, &vault_owner);

        let vault = self
            .vaults
            .get(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        let position = self
            .positions
            .get(&position_addr)
            .ok_or(VaultError::PositionNotFound)?;
        access::require_registered_depositor(position, &caller)?;

        if amount == 0 {
            return Err(VaultError::ZeroDeposit);
        }
        if !is_share_multiple(amount) {
            return Err(VaultError::InvalidDepositAmount {
                amount,
                share_price: SHARE_PRICE_GRAINS,
            });
        }
        if amount < vault.min_deposit {
            return Err(VaultError::BelowMinimumDeposit {
                amount,
                min_deposit: vault.min_deposit,
            });
        }

        let new_balance = vault
            .balance
            .checked_add(amount)
            .ok_or(VaultError::AmountOverflow)?;
        let new_locked = position
            .locked_amount
            .checked_add(amount)
            .ok_or(VaultError::AmountOverflow)?;
        let unlock_time = lock::compute_unlock(now, vault.lock_period);
        let mint = vault.share_mint;

        // Collaborator preflights. After these, the commit below cannot
        // fail partway.
        ShareLedger::new(shares).ensure_issue(&mint, &vault_addr, &caller, amount)?;
        coins.ensure_transfer(&caller, &vault_addr, amount)?;

        coins.transfer(&caller, &vault_addr, amount)?;
        let shares_minted =
            ShareLedger::new(shares).issue(&mint, &vault_addr, &caller, amount)?;

        let vault = self
            .vaults
            .get_mut(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        vault.balance = new_balance;

        let position = self
            .positions
            .get_mut(&position_addr)
            .ok_or(VaultError::PositionNotFound)?;
        position.locked_amount = new_locked;
        position.deposit_time = now;
        position.unlock_time = unlock_time;

        Ok(DepositReceipt {
            vault_balance: new_balance,
            locked_amount: new_locked,
            shares_minted,
            unlock_time,
        })
    }

    /// Withdraw the caller's entire unlocked position.
    ///
    /// Pays out the full locked amount, zeroes it, and burns the
    /// corresponding shares. Partial withdrawal does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NothingToWithdraw`] for an empty position,
    /// [`VaultError::FundsStillLocked`] before the unlock time, and
    /// [`VaultError::InsufficientVaultBalance`] when the vault cannot
    /// cover the position (possible after administrative transfers).
    /// Substrate failures pass through unmodified.
    pub fn withdraw(
        &mut self,
        coins: &mut CoinLedger,
        shares: &mut ShareBook,
        caller: Address,
        vault_owner: Address,
        now: i64,
    ) -> Result<WithdrawReceipt, VaultError> {
        let vault_addr = vault_state_address(&vault_owner);
        let position_addr = position_address(&caller, &vault_owner);

        let vault = self
            .vaults
            .get(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        let position = self
            .positions
            .get(&position_addr)
            .ok_or(VaultError::PositionNotFound)?;
        access::require_registered_depositor(position, &caller)?;

        let amount = position.locked_amount;
        if amount == 0 {
            return Err(VaultError::NothingToWithdraw);
        }
        if lock::is_locked(now, position.unlock_time) {
            return Err(VaultError::FundsStillLocked {
                unlock_time: position.unlock_time,
                remaining: lock::remaining(now, position.unlock_time),
            });
        }
        let new_balance =
            vault
                .balance
                .checked_sub(amount)
                .ok_or(VaultError::InsufficientVaultBalance {
                    requested: amount,
                    balance: vault.balance,
                })?;
        let mint = vault.share_mint;

        ShareLedger::new(shares).ensure_redeem(&mint, &caller, amount)?;
        coins.ensure_transfer(&vault_addr, &caller, amount)?;

        coins.transfer(&vault_addr, &caller, amount)?;
        let shares_burned = ShareLedger::new(shares).redeem(&mint, &caller, amount)?;

        let vault = self
            .vaults
            .get_mut(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        vault.balance = new_balance;

        let position = self
            .positions
            .get_mut(&position_addr)
            .ok_or(VaultError::PositionNotFound)?;
        position.locked_amount = 0;

        Ok(WithdrawReceipt {
            amount,
            shares_burned,
            vault_balance: new_balance,
        })
    }

    /// Owner-only transfer of vault funds to an arbitrary destination.
    ///
    /// The destination needs no registration and no share relationship,
    /// and the operation is deliberately unconstrained by depositor lock
    /// state; see the module docs for the trust model this implies.
    /// Returns the new vault balance.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::VaultNotFound`] for a missing vault,
    /// [`VaultError::Unauthorized`] if `caller` is not its owner, and
    /// [`VaultError::InsufficientVaultBalance`] if `amount` exceeds the
    /// vault balance. Transfer failures pass through unmodified.
    pub fn admin_transfer(
        &mut self,
        coins: &mut CoinLedger,
        caller: Address,
        vault_owner: Address,
        destination: Address,
        amount: u64,
    ) -> Result<u64, VaultError> {
        let vault_addr = vault_state_address(&vault_owner);
        let vault = self
            .vaults
            .get(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        access::require_owner(vault, &caller)?;

        let new_balance =
            vault
                .balance
                .checked_sub(amount)
                .ok_or(VaultError::InsufficientVaultBalance {
                    requested: amount,
                    balance: vault.balance,
                })?;

        coins.transfer(&vault_addr, &destination, amount)?;

        let vault = self
            .vaults
            .get_mut(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        vault.balance = new_balance;
        Ok(new_balance)
    }

    /// Owner-only update of the vault's lock period and minimum deposit.
    ///
    /// Applies prospectively: unlock times already computed under the old
    /// lock period are not recomputed. Returns the updated vault record.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::VaultNotFound`] for a missing vault,
    /// [`VaultError::Unauthorized`] if `caller` is not its owner, and
    /// [`VaultError::InvalidSettings`] for a non-positive lock period or
    /// a zero minimum deposit.
    pub fn update_settings(
        &mut self,
        caller: Address,
        vault_owner: Address,
        new_lock_period: i64,
        new_min_deposit: u64,
    ) -> Result<VaultAccount, VaultError> {
        let vault_addr = vault_state_address(&vault_owner);
        let vault = self
            .vaults
            .get_mut(&vault_addr)
            .ok_or(VaultError::VaultNotFound)?;
        access::require_owner(vault, &caller)?;

        if new_lock_period <= 0 || new_min_deposit == 0 {
            return Err(VaultError::InvalidSettings);
        }

        vault.lock_period = new_lock_period;
        vault.min_deposit = new_min_deposit;
        Ok(vault.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PositionStatus;

    const NOW: i64 = 1_700_000_000;

    fn addr(fill: u8) -> Address {
        Address::from_bytes([fill; 32])
    }

    /// Engine plus funded owner and depositor wallets.
    fn setup() -> (VaultEngine, CoinLedger, ShareBook, Address, Address) {
        let mut coins = CoinLedger::new();
        let owner = addr(1);
        let depositor = addr(2);
        coins.credit(&owner, 10_000_000_000).unwrap();
        coins.credit(&depositor, 10_000_000_000).unwrap();
        (VaultEngine::new(), coins, ShareBook::new(), owner, depositor)
    }

    #[test]
    fn register_creates_vault_with_defaults() {
        let (mut engine, _, mut shares, owner, _) = setup();
        let vault = engine.register(&mut shares, owner).unwrap();

        assert_eq!(vault.owner, owner);
        assert_eq!(vault.balance, 0);
        assert_eq!(vault.lock_period, DEFAULT_LOCK_PERIOD_SECS);
        assert_eq!(vault.min_deposit, DEFAULT_MIN_DEPOSIT_GRAINS);
        assert!(shares.mint_exists(&vault.share_mint));
    }

    #[test]
    fn second_register_rejected_and_state_unchanged() {
        let (mut engine, _, mut shares, owner, _) = setup();
        engine.register(&mut shares, owner).unwrap();
        let err = engine.register(&mut shares, owner).unwrap_err();
        assert!(matches!(err, VaultError::AlreadyRegistered));
        assert_eq!(engine.vault_count(), 1);
    }

    #[test]
    fn register_depositor_requires_vault() {
        let (mut engine, _, _, owner, depositor) = setup();
        let err = engine.register_depositor(depositor, owner).unwrap_err();
        assert!(matches!(err, VaultError::VaultNotFound));
    }

    #[test]
    fn second_register_depositor_rejected() {
        let (mut engine, _, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();
        let err = engine.register_depositor(depositor, owner).unwrap_err();
        assert!(matches!(err, VaultError::AlreadyRegistered));
    }

    #[test]
    fn owner_deposit_moves_grains_without_minting() {
        let (mut engine, mut coins, mut shares, owner, _) = setup();
        let vault = engine.register(&mut shares, owner).unwrap();

        let balance = engine.deposit(&mut coins, owner, 1_000_000_000).unwrap();
        assert_eq!(balance, 1_000_000_000);
        assert_eq!(coins.balance_of(&vault.coin_account()), 1_000_000_000);
        assert_eq!(shares.total_supply(&vault.share_mint), 0);
    }

    #[test]
    fn owner_deposit_zero_rejected() {
        let (mut engine, mut coins, mut shares, owner, _) = setup();
        engine.register(&mut shares, owner).unwrap();
        let err = engine.deposit(&mut coins, owner, 0).unwrap_err();
        assert!(matches!(err, VaultError::ZeroDeposit));
    }

    #[test]
    fn owner_deposit_below_minimum_rejected() {
        let (mut engine, mut coins, mut shares, owner, _) = setup();
        engine.register(&mut shares, owner).unwrap();
        let err = engine.deposit(&mut coins, owner, 99_999_999).unwrap_err();
        assert!(matches!(err, VaultError::BelowMinimumDeposit { .. }));
    }

    #[test]
    fn depositor_deposit_locks_and_mints() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        let vault = engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();

        let receipt = engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 300_000_000, NOW)
            .unwrap();

        assert_eq!(receipt.vault_balance, 300_000_000);
        assert_eq!(receipt.locked_amount, 300_000_000);
        assert_eq!(receipt.shares_minted, 3);
        assert_eq!(receipt.unlock_time, NOW + DEFAULT_LOCK_PERIOD_SECS);
        assert_eq!(shares.balance_of(&vault.share_mint, &depositor), 3);

        let position = engine.position(&depositor, &owner).unwrap();
        assert_eq!(position.status(NOW), PositionStatus::Locked);
    }

    #[test]
    fn depositor_deposit_non_multiple_rejected_cleanly() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();

        let before = coins.balance_of(&depositor);
        let err = engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 150_000_000, NOW)
            .unwrap_err();
        assert!(matches!(err, VaultError::InvalidDepositAmount { .. }));

        // Nothing moved, nothing minted, position untouched.
        assert_eq!(coins.balance_of(&depositor), before);
        let position = engine.position(&depositor, &owner).unwrap();
        assert_eq!(position.locked_amount, 0);
    }

    #[test]
    fn depositor_deposit_without_registration_rejected() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        let err = engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 100_000_000, NOW)
            .unwrap_err();
        assert!(matches!(err, VaultError::PositionNotFound));
    }

    #[test]
    fn redeposit_restarts_lock_for_whole_balance() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();

        engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 100_000_000, NOW)
            .unwrap();
        let later = NOW + 10_000;
        let receipt = engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 200_000_000, later)
            .unwrap();

        // The whole 0.3 STRG is governed by the fresh window.
        assert_eq!(receipt.locked_amount, 300_000_000);
        assert_eq!(receipt.unlock_time, later + DEFAULT_LOCK_PERIOD_SECS);
    }

    #[test]
    fn withdraw_before_unlock_rejected() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();
        engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 100_000_000, NOW)
            .unwrap();

        let err = engine
            .withdraw(&mut coins, &mut shares, depositor, owner, NOW + 1)
            .unwrap_err();
        assert!(matches!(err, VaultError::FundsStillLocked { .. }));
    }

    #[test]
    fn withdraw_at_unlock_boundary_succeeds() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();
        engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 100_000_000, NOW)
            .unwrap();

        let unlock = NOW + DEFAULT_LOCK_PERIOD_SECS;
        let receipt = engine
            .withdraw(&mut coins, &mut shares, depositor, owner, unlock)
            .unwrap();
        assert_eq!(receipt.amount, 100_000_000);
        assert_eq!(receipt.shares_burned, 1);
        assert_eq!(receipt.vault_balance, 0);

        let position = engine.position(&depositor, &owner).unwrap();
        assert_eq!(position.locked_amount, 0);
        assert_eq!(position.status(unlock), PositionStatus::Idle);
    }

    #[test]
    fn withdraw_empty_position_rejected() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();
        let err = engine
            .withdraw(&mut coins, &mut shares, depositor, owner, NOW)
            .unwrap_err();
        assert!(matches!(err, VaultError::NothingToWithdraw));
    }

    #[test]
    fn admin_transfer_ignores_locks() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();
        engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 500_000_000, NOW)
            .unwrap();

        // The locked grains move anyway. That's the protocol.
        let destination = addr(9);
        let balance = engine
            .admin_transfer(&mut coins, owner, owner, destination, 500_000_000)
            .unwrap();
        assert_eq!(balance, 0);
        assert_eq!(coins.balance_of(&destination), 500_000_000);
    }

    #[test]
    fn admin_transfer_from_non_owner_rejected() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.deposit(&mut coins, owner, 1_000_000_000).unwrap();

        let err = engine
            .admin_transfer(&mut coins, depositor, owner, addr(9), 100)
            .unwrap_err();
        assert!(matches!(err, VaultError::Unauthorized));
        assert_eq!(engine.vault(&owner).unwrap().balance, 1_000_000_000);
    }

    #[test]
    fn admin_transfer_beyond_balance_rejected() {
        let (mut engine, mut coins, mut shares, owner, _) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.deposit(&mut coins, owner, 1_000_000_000).unwrap();

        let err = engine
            .admin_transfer(&mut coins, owner, owner, addr(9), 1_000_000_001)
            .unwrap_err();
        assert!(matches!(err, VaultError::InsufficientVaultBalance { .. }));
    }

    #[test]
    fn update_settings_applies_prospectively() {
        let (mut engine, mut coins, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(depositor, owner).unwrap();
        engine
            .deposit_by_depositor(&mut coins, &mut shares, depositor, owner, 100_000_000, NOW)
            .unwrap();
        let unlock_before = engine.position(&depositor, &owner).unwrap().unlock_time;

        let vault = engine
            .update_settings(owner, owner, 86_400, 200_000_000)
            .unwrap();
        assert_eq!(vault.lock_period, 86_400);
        assert_eq!(vault.min_deposit, 200_000_000);

        // Existing unlock times are not recomputed.
        assert_eq!(
            engine.position(&depositor, &owner).unwrap().unlock_time,
            unlock_before
        );
    }

    #[test]
    fn update_settings_rejects_non_positive_values() {
        let (mut engine, _, mut shares, owner, _) = setup();
        engine.register(&mut shares, owner).unwrap();

        assert!(matches!(
            engine.update_settings(owner, owner, 0, 100),
            Err(VaultError::InvalidSettings)
        ));
        assert!(matches!(
            engine.update_settings(owner, owner, -86_400, 100),
            Err(VaultError::InvalidSettings)
        ));
        assert!(matches!(
            engine.update_settings(owner, owner, 86_400, 0),
            Err(VaultError::InvalidSettings)
        ));
        // Settings unchanged after the rejections.
        let vault = engine.vault(&owner).unwrap();
        assert_eq!(vault.lock_period, DEFAULT_LOCK_PERIOD_SECS);
        assert_eq!(vault.min_deposit, DEFAULT_MIN_DEPOSIT_GRAINS);
    }

    #[test]
    fn update_settings_from_non_owner_rejected() {
        let (mut engine, _, mut shares, owner, depositor) = setup();
        engine.register(&mut shares, owner).unwrap();
        let err = engine
            .update_settings(depositor, owner, 86_400, 100_000_000)
            .unwrap_err();
        assert!(matches!(err, VaultError::Unauthorized));
    }

    #[test]
    fn depositor_without_funds_cannot_deposit() {
        let (mut engine, mut coins, mut shares, owner, _) = setup();
        let broke = addr(7);
        engine.register(&mut shares, owner).unwrap();
        engine.register_depositor(broke, owner).unwrap();

        let err = engine
            .deposit_by_depositor(&mut coins, &mut shares, broke, owner, 100_000_000, NOW)
            .unwrap_err();
        // Substrate error, surfaced unmodified.
        assert!(matches!(err, VaultError::Coin(_)));
        assert_eq!(engine.position(&broke, &owner).unwrap().locked_amount, 0);
        assert_eq!(engine.vault(&owner).unwrap().balance, 0);
    }
}
