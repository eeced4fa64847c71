//! # Vault Error Taxonomy
//!
//! Every way a vault operation can legally fail, as one enum. Each
//! variant names a precondition the caller violated; none of them is
//! retryable by the engine itself, and none is emitted after a partial
//! mutation: a returned error means state is exactly as it was.
//!
//! Substrate failures (coin ledger, share book) are not part of this
//! taxonomy. They pass through unmodified via transparent variants so
//! calling layers see the original error, not a re-wrapped paraphrase.

use thiserror::Error;

use strongroom_ledger::coins::CoinError;
use strongroom_ledger::shares::ShareError;

/// Errors returned by vault engine operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The caller does not hold the role (owner or registered depositor)
    /// the operation requires.
    #[error("unauthorized: caller does not hold the required role for this vault")]
    Unauthorized,

    /// Attempted to create a vault or depositor position that already
    /// exists.
    #[error("already registered")]
    AlreadyRegistered,

    /// No vault exists for the referenced owner.
    #[error("vault not found for this owner")]
    VaultNotFound,

    /// No depositor position exists for this (depositor, vault) pair.
    #[error("depositor position not found")]
    PositionNotFound,

    /// Deposit amount is zero.
    #[error("deposit amount must be greater than zero")]
    ZeroDeposit,

    /// Depositor-side deposit is not a multiple of the share price.
    #[error("deposit of {amount} grains is not a multiple of the {share_price}-grain share price")]
    InvalidDepositAmount {
        /// The rejected amount.
        amount: u64,
        /// The fixed share price the amount must divide by.
        share_price: u64,
    },

    /// Deposit is below the vault's configured minimum.
    #[error("deposit of {amount} grains is below the vault minimum of {min_deposit}")]
    BelowMinimumDeposit {
        /// The rejected amount.
        amount: u64,
        /// The vault's configured minimum deposit.
        min_deposit: u64,
    },

    /// A transfer or withdrawal would drive the vault balance negative.
    #[error("insufficient vault balance: requested {requested}, vault holds {balance}")]
    InsufficientVaultBalance {
        /// Grains the operation tried to move out.
        requested: u64,
        /// The vault's current tracked balance.
        balance: u64,
    },

    /// Withdrawal attempted with no locked balance.
    #[error("nothing to withdraw")]
    NothingToWithdraw,

    /// Withdrawal attempted before the position's unlock time.
    #[error("funds still locked for {remaining} more seconds (unlock at {unlock_time})")]
    FundsStillLocked {
        /// Unix timestamp at which the position unlocks.
        unlock_time: i64,
        /// Seconds left until unlock, from the operation's `now`.
        remaining: i64,
    },

    /// Settings update with a non-positive lock period or minimum deposit.
    #[error("invalid settings: lock period and minimum deposit must be positive")]
    InvalidSettings,

    /// Arithmetic on a balance or locked amount would overflow.
    #[error("amount overflow: operation would exceed representable balances")]
    AmountOverflow,

    /// The value-transfer service failed; surfaced unmodified.
    #[error(transparent)]
    Coin(#[from] CoinError),

    /// The share-token service failed; surfaced unmodified.
    #[error(transparent)]
    Share(#[from] ShareError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violated_rule() {
        let err = VaultError::InvalidDepositAmount {
            amount: 50_000_000,
            share_price: 100_000_000,
        };
        assert!(err.to_string().contains("not a multiple"));

        let err = VaultError::FundsStillLocked {
            unlock_time: 1_000,
            remaining: 400,
        };
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn substrate_errors_pass_through_unmodified() {
        let inner = CoinError::InsufficientFunds { have: 1, need: 2 };
        let expected = inner.to_string();
        let wrapped: VaultError = inner.into();
        assert_eq!(wrapped.to_string(), expected);
    }
}
