//! # Access Control
//!
//! Stateless role predicates. Every privileged engine operation calls
//! one of these before touching any state; they read, compare, and
//! return; no side effects, no partial evaluation.

use strongroom_ledger::address::Address;

use crate::error::VaultError;
use crate::state::{DepositorPosition, VaultAccount};

/// Require that `caller` is the vault's owner.
///
/// # Errors
///
/// Returns [`VaultError::Unauthorized`] for any other identity.
pub fn require_owner(vault: &VaultAccount, caller: &Address) -> Result<(), VaultError> {
    if vault.owner == *caller {
        Ok(())
    } else {
        Err(VaultError::Unauthorized)
    }
}

/// Require that `caller` is the depositor this position was registered to.
///
/// # Errors
///
/// Returns [`VaultError::Unauthorized`] for any other identity.
pub fn require_registered_depositor(
    position: &DepositorPosition,
    caller: &Address,
) -> Result<(), VaultError> {
    if position.depositor == *caller {
        Ok(())
    } else {
        Err(VaultError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DEFAULT_LOCK_PERIOD_SECS, DEFAULT_MIN_DEPOSIT_GRAINS};

    fn addr(fill: u8) -> Address {
        Address::from_bytes([fill; 32])
    }

    fn vault(owner: Address) -> VaultAccount {
        VaultAccount {
            owner,
            share_mint: addr(200),
            balance: 0,
            lock_period: DEFAULT_LOCK_PERIOD_SECS,
            min_deposit: DEFAULT_MIN_DEPOSIT_GRAINS,
        }
    }

    #[test]
    fn owner_passes_owner_check() {
        let v = vault(addr(1));
        assert!(require_owner(&v, &addr(1)).is_ok());
    }

    #[test]
    fn non_owner_fails_owner_check() {
        let v = vault(addr(1));
        assert!(matches!(
            require_owner(&v, &addr(2)),
            Err(VaultError::Unauthorized)
        ));
    }

    #[test]
    fn depositor_passes_depositor_check() {
        let p = DepositorPosition::new(addr(3), addr(1));
        assert!(require_registered_depositor(&p, &addr(3)).is_ok());
    }

    #[test]
    fn stranger_fails_depositor_check() {
        let p = DepositorPosition::new(addr(3), addr(1));
        assert!(matches!(
            require_registered_depositor(&p, &addr(4)),
            Err(VaultError::Unauthorized)
        ));
    }
}
