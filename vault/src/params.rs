//! # Protocol Parameters
//!
//! Every magic number in the vault protocol lives here. If you are
//! hardcoding a constant somewhere else, you are doing it wrong and you
//! owe the team coffee.
//!
//! Amounts are `u64` grains, durations are `i64` unix seconds. The share
//! price is the load-bearing constant: shares are minted and redeemed at
//! this fixed rate for the lifetime of a vault, with no net-asset-value
//! repricing of any kind.

/// Grains per whole STRG. 10^9, the usual nine-decimal split.
pub const GRAINS_PER_STRG: u64 = 1_000_000_000;

/// Fixed price of one vault share: 100,000,000 grains (0.1 STRG).
///
/// Depositor deposits must be exact multiples of this value, each
/// multiple minting exactly one share. The rate never moves: a vault
/// drained by its owner still redeems shares at this price, which is a
/// property of the protocol, not an accident (see the engine docs).
pub const SHARE_PRICE_GRAINS: u64 = 100_000_000;

/// Default lock period for a new vault: 4 days.
pub const DEFAULT_LOCK_PERIOD_SECS: i64 = 4 * 86_400;

/// Default minimum deposit for a new vault: 0.1 STRG.
pub const DEFAULT_MIN_DEPOSIT_GRAINS: u64 = 100_000_000;

/// Seconds per day, for lock-period display and conversion.
pub const SECS_PER_DAY: i64 = 86_400;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_price_divides_whole_coins() {
        // A whole STRG must convert to a whole number of shares, or the
        // deposit-multiple rule would reject round deposits.
        assert_eq!(GRAINS_PER_STRG % SHARE_PRICE_GRAINS, 0);
        assert_eq!(GRAINS_PER_STRG / SHARE_PRICE_GRAINS, 10);
    }

    #[test]
    fn default_lock_period_is_four_days() {
        assert_eq!(DEFAULT_LOCK_PERIOD_SECS, 345_600);
        assert_eq!(DEFAULT_LOCK_PERIOD_SECS % SECS_PER_DAY, 0);
    }

    #[test]
    fn defaults_are_positive() {
        // The engine rejects non-positive settings; the defaults must
        // clear the same bar.
        assert!(DEFAULT_LOCK_PERIOD_SECS > 0);
        assert!(DEFAULT_MIN_DEPOSIT_GRAINS > 0);
    }

    #[test]
    fn default_minimum_equals_one_share() {
        // One share is the smallest depositor position; a higher default
        // minimum would make the smallest valid deposit unreachable.
        assert_eq!(DEFAULT_MIN_DEPOSIT_GRAINS, SHARE_PRICE_GRAINS);
    }
}
