//! # Vault State Records
//!
//! The two persisted aggregates of the protocol, and the deterministic
//! addressing that locates them.
//!
//! A [`VaultAccount`] exists once per owner; a [`DepositorPosition`]
//! exists once per (depositor, vault) pair. Both are plain serializable
//! records; every rule about *changing* them lives in the engine, which
//! is the only writer.
//!
//! ## Addressing
//!
//! Records are stored at addresses derived from fixed tags plus the
//! relevant identities, so any party can recompute where a record lives
//! without a lookup table:
//!
//! ```text
//! vault state   = derive(VAULT_STATE_TAG, owner)
//! share mint    = derive(SHARE_MINT_TAG,  owner)
//! position      = derive(POSITION_TAG,    depositor, owner)
//! ```
//!
//! The tags are part of each record's identity: reads and writes must use
//! the same tag string, and the three tags partition the address space
//! (BLAKE3 key derivation separates domains by construction).

use serde::{Deserialize, Serialize};

use strongroom_ledger::address::{derive_address, Address};

use crate::lock;

/// Derivation tag for vault state accounts.
pub const VAULT_STATE_TAG: &str = "strongroom/vault-state/v1";

/// Derivation tag for vault share mints.
pub const SHARE_MINT_TAG: &str = "strongroom/share-mint/v1";

/// Derivation tag for depositor positions.
pub const POSITION_TAG: &str = "strongroom/depositor-position/v1";

/// Address of the vault state account for an owner.
pub fn vault_state_address(owner: &Address) -> Address {
    derive_address(VAULT_STATE_TAG, &[owner])
}

/// Address of the share mint controlled by an owner's vault.
pub fn share_mint_address(owner: &Address) -> Address {
    derive_address(SHARE_MINT_TAG, &[owner])
}

/// Address of the position record for a (depositor, vault owner) pair.
pub fn position_address(depositor: &Address, vault_owner: &Address) -> Address {
    derive_address(POSITION_TAG, &[depositor, vault_owner])
}

// ---------------------------------------------------------------------------
// VaultAccount
// ---------------------------------------------------------------------------

/// The per-owner vault aggregate.
///
/// `owner` and `share_mint` are set at registration and never change.
/// `balance` tracks the grains pooled in the vault's coin account and
/// moves only through engine operations; `lock_period` and `min_deposit`
/// move only through `update_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultAccount {
    /// Identity of the administrator. Immutable after registration.
    pub owner: Address,
    /// The share mint this vault controls. Immutable after registration.
    pub share_mint: Address,
    /// Grains currently held by the vault.
    pub balance: u64,
    /// Seconds a new deposit remains locked. Always positive.
    pub lock_period: i64,
    /// Minimum grains accepted per deposit. Always positive.
    pub min_deposit: u64,
}

impl VaultAccount {
    /// The vault's own coin account: the derived state address doubles
    /// as the account that holds the pooled grains.
    pub fn coin_account(&self) -> Address {
        vault_state_address(&self.owner)
    }
}

// ---------------------------------------------------------------------------
// DepositorPosition
// ---------------------------------------------------------------------------

/// The per-(depositor, vault) aggregate.
///
/// Created all-zero at registration. Every successful deposit adds to
/// `locked_amount` and restarts the lock clock for the whole accumulated
/// balance; withdrawal zeroes `locked_amount` and leaves the timestamps
/// as a record of the last deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositorPosition {
    /// Identity of the depositor. Immutable after registration.
    pub depositor: Address,
    /// Owner identity of the vault this position belongs to (a lookup
    /// key, not ownership). Immutable after registration.
    pub vault_owner: Address,
    /// Grains currently locked and not yet withdrawn.
    pub locked_amount: u64,
    /// Unix timestamp of the most recent deposit.
    pub deposit_time: i64,
    /// Unix timestamp at which the locked balance becomes withdrawable.
    /// Always `deposit_time + lock_period` as of the deposit that set it.
    pub unlock_time: i64,
}

impl DepositorPosition {
    /// A freshly registered position with all numeric fields zero.
    pub fn new(depositor: Address, vault_owner: Address) -> Self {
        Self {
            depositor,
            vault_owner,
            locked_amount: 0,
            deposit_time: 0,
            unlock_time: 0,
        }
    }

    /// Lifecycle state of this position at time `now`.
    pub fn status(&self, now: i64) -> PositionStatus {
        if self.locked_amount == 0 {
            PositionStatus::Idle
        } else if lock::is_locked(now, self.unlock_time) {
            PositionStatus::Locked
        } else {
            PositionStatus::Unlocked
        }
    }
}

/// Where a position sits in its lifecycle.
///
/// ```text
/// Idle --deposit--> Locked --time--> Unlocked --withdraw--> Idle
///                     ^                  |
///                     '----deposit-------'   (deposit restarts the lock)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    /// Registered, nothing locked.
    Idle,
    /// Funds locked, unlock time not yet reached.
    Locked,
    /// Funds locked and withdrawable.
    Unlocked,
}

impl std::fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionStatus::Idle => write!(f, "Idle"),
            PositionStatus::Locked => write!(f, "Locked"),
            PositionStatus::Unlocked => write!(f, "Unlocked"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(fill: u8) -> Address {
        Address::from_bytes([fill; 32])
    }

    #[test]
    fn addressing_is_deterministic() {
        let owner = addr(1);
        assert_eq!(vault_state_address(&owner), vault_state_address(&owner));
        assert_eq!(share_mint_address(&owner), share_mint_address(&owner));
    }

    #[test]
    fn tags_partition_the_address_space() {
        let owner = addr(1);
        let vault = vault_state_address(&owner);
        let mint = share_mint_address(&owner);
        let position = position_address(&owner, &owner);
        assert_ne!(vault, mint);
        assert_ne!(vault, position);
        assert_ne!(mint, position);
    }

    #[test]
    fn position_address_depends_on_both_identities() {
        let depositor = addr(1);
        let owner_a = addr(2);
        let owner_b = addr(3);
        assert_ne!(
            position_address(&depositor, &owner_a),
            position_address(&depositor, &owner_b)
        );
        assert_ne!(
            position_address(&depositor, &owner_a),
            position_address(&owner_a, &depositor)
        );
    }

    #[test]
    fn new_position_is_idle_and_zeroed() {
        let position = DepositorPosition::new(addr(1), addr(2));
        assert_eq!(position.locked_amount, 0);
        assert_eq!(position.deposit_time, 0);
        assert_eq!(position.unlock_time, 0);
        assert_eq!(position.status(1_000_000), PositionStatus::Idle);
    }

    #[test]
    fn status_follows_the_lock_window() {
        let mut position = DepositorPosition::new(addr(1), addr(2));
        position.locked_amount = 100;
        position.deposit_time = 1_000;
        position.unlock_time = 2_000;

        assert_eq!(position.status(1_500), PositionStatus::Locked);
        assert_eq!(position.status(1_999), PositionStatus::Locked);
        assert_eq!(position.status(2_000), PositionStatus::Unlocked);
        assert_eq!(position.status(5_000), PositionStatus::Unlocked);
    }

    #[test]
    fn vault_serde_roundtrip() {
        let vault = VaultAccount {
            owner: addr(1),
            share_mint: addr(2),
            balance: 5,
            lock_period: 345_600,
            min_deposit: 100_000_000,
        };
        let json = serde_json::to_string(&vault).unwrap();
        let restored: VaultAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(vault, restored);
    }
}
