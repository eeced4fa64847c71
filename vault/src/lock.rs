//! # Lock Clock
//!
//! Time arithmetic for deposit locks. Plain integer seconds on unix
//! timestamps, with no timezone or calendar logic anywhere. The engine
//! validates that lock periods are positive before any of these
//! functions see them.

/// Unlock timestamp for a deposit made at `now` under `lock_period`.
///
/// Saturates at the far end of time rather than wrapping; an absurd
/// lock period locks forever instead of unlocking in the past.
pub fn compute_unlock(now: i64, lock_period: i64) -> i64 {
    now.saturating_add(lock_period)
}

/// Seconds remaining until `unlock_time`, never negative.
pub fn remaining(now: i64, unlock_time: i64) -> i64 {
    (unlock_time - now).max(0)
}

/// Whether the lock window is still open at `now`.
///
/// The boundary is exclusive: at exactly `unlock_time` the funds are
/// withdrawable.
pub fn is_locked(now: i64, unlock_time: i64) -> bool {
    now < unlock_time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_now_plus_period() {
        assert_eq!(compute_unlock(1_000, 345_600), 346_600);
    }

    #[test]
    fn absurd_period_saturates_instead_of_wrapping() {
        assert_eq!(compute_unlock(1_000, i64::MAX), i64::MAX);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        assert_eq!(remaining(1_000, 1_400), 400);
        assert_eq!(remaining(1_400, 1_400), 0);
        assert_eq!(remaining(2_000, 1_400), 0);
    }

    #[test]
    fn locked_strictly_before_unlock_time() {
        assert!(is_locked(1_399, 1_400));
        assert!(!is_locked(1_400, 1_400));
        assert!(!is_locked(1_401, 1_400));
    }
}
