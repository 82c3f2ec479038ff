//! Pure time arithmetic: sale phase and linear vesting.
//!
//! Nothing here touches storage or the environment. Callers pass the ledger
//! timestamp in explicitly.

use crate::types::SalePhase;
use crate::Error;

/// The date fields of a sale that drive its phase and vesting curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timeline {
    pub start_date: u64,
    pub end_date: u64,
    pub release_delay: u64,
    pub vesting_duration: u64,
}

impl Timeline {
    /// Timestamp at which claiming opens.
    pub fn claim_opens_at(&self) -> u64 {
        self.end_date.saturating_add(self.release_delay)
    }

    /// Timestamp at which every purchased token is unlocked.
    pub fn fully_vested_at(&self) -> u64 {
        self.claim_opens_at().saturating_add(self.vesting_duration)
    }
}

pub fn phase(timeline: &Timeline, validated: bool, now: u64) -> SalePhase {
    if !validated {
        SalePhase::Unvalidated
    } else if now < timeline.start_date {
        SalePhase::Pending
    } else if now < timeline.end_date {
        SalePhase::Open
    } else if now < timeline.claim_opens_at() {
        SalePhase::VestingLocked
    } else {
        SalePhase::Claimable
    }
}

pub fn is_started(timeline: &Timeline, validated: bool, now: u64) -> bool {
    validated && now >= timeline.start_date
}

pub fn is_ended(timeline: &Timeline, validated: bool, now: u64) -> bool {
    validated && now >= timeline.end_date
}

pub fn is_claimable(timeline: &Timeline, validated: bool, now: u64) -> bool {
    validated && now >= timeline.claim_opens_at()
}

/// Tokens a buyer may claim at `now`.
///
/// Zero before claiming opens. Between `claim_opens_at` and
/// `fully_vested_at` the unlocked amount grows linearly from zero to
/// `purchased`; afterwards (or with a zero vesting duration) everything not
/// yet claimed is available.
pub fn claimable_amount(
    timeline: &Timeline,
    validated: bool,
    purchased: i128,
    claimed: i128,
    now: u64,
) -> Result<i128, Error> {
    if !is_claimable(timeline, validated, now) {
        return Ok(0);
    }

    let unlocked = if timeline.vesting_duration == 0 || now >= timeline.fully_vested_at() {
        purchased
    } else {
        let elapsed = i128::from(now - timeline.claim_opens_at());
        let linear = purchased
            .checked_mul(elapsed)
            .ok_or(Error::ArithmeticOverflow)?
            / i128::from(timeline.vesting_duration);
        linear.min(purchased)
    };

    Ok(unlocked.saturating_sub(claimed).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const END: u64 = 10_000;
    const DELAY: u64 = 3_600;
    const VESTING: u64 = 864_000;

    fn timeline(vesting_duration: u64) -> Timeline {
        Timeline {
            start_date: 1_000,
            end_date: END,
            release_delay: DELAY,
            vesting_duration,
        }
    }

    #[test]
    fn phase_walks_forward_with_the_clock() {
        let t = timeline(VESTING);
        assert_eq!(phase(&t, false, 5_000), SalePhase::Unvalidated);
        assert_eq!(phase(&t, true, 999), SalePhase::Pending);
        assert_eq!(phase(&t, true, 1_000), SalePhase::Open);
        assert_eq!(phase(&t, true, END - 1), SalePhase::Open);
        assert_eq!(phase(&t, true, END), SalePhase::VestingLocked);
        assert_eq!(phase(&t, true, END + DELAY - 1), SalePhase::VestingLocked);
        assert_eq!(phase(&t, true, END + DELAY), SalePhase::Claimable);
    }

    #[test]
    fn unvalidated_sale_is_never_started() {
        let t = timeline(VESTING);
        assert!(!is_started(&t, false, u64::MAX));
        assert!(!is_ended(&t, false, u64::MAX));
        assert!(!is_claimable(&t, false, u64::MAX));
    }

    #[test]
    fn nothing_claimable_before_release() {
        let t = timeline(VESTING);
        assert_eq!(claimable_amount(&t, true, 1_000, 0, END).unwrap(), 0);
        assert_eq!(
            claimable_amount(&t, true, 1_000, 0, END + DELAY - 1).unwrap(),
            0
        );
    }

    #[test]
    fn linear_unlock_at_midpoint() {
        let t = timeline(VESTING);
        let purchased = 45_454_545_454i128;
        let mid = END + DELAY + VESTING / 2;
        assert_eq!(
            claimable_amount(&t, true, purchased, 0, mid).unwrap(),
            22_727_272_727
        );
    }

    #[test]
    fn claimed_tokens_are_subtracted() {
        let t = timeline(VESTING);
        let mid = END + DELAY + VESTING / 2;
        assert_eq!(claimable_amount(&t, true, 1_000, 500, mid).unwrap(), 0);
        assert_eq!(claimable_amount(&t, true, 1_000, 400, mid).unwrap(), 100);
    }

    #[test]
    fn fully_unlocked_after_vesting_window() {
        let t = timeline(VESTING);
        let done = t.fully_vested_at();
        assert_eq!(claimable_amount(&t, true, 1_000, 250, done).unwrap(), 750);
        assert_eq!(
            claimable_amount(&t, true, 1_000, 250, done + 1_000_000).unwrap(),
            750
        );
    }

    #[test]
    fn zero_vesting_releases_everything_at_once() {
        let t = timeline(0);
        assert_eq!(
            claimable_amount(&t, true, 1_000, 0, END + DELAY).unwrap(),
            1_000
        );
    }

    #[test]
    fn claimable_is_monotonic_in_time() {
        let t = timeline(VESTING);
        let purchased = 987_654_321i128;
        let mut previous = 0i128;
        let mut now = END;
        while now <= t.fully_vested_at() {
            let current = claimable_amount(&t, true, purchased, 0, now).unwrap();
            assert!(current >= previous, "claimable decreased at {now}");
            assert!(current <= purchased);
            previous = current;
            now += 7_919;
        }
        let last = claimable_amount(&t, true, purchased, 0, t.fully_vested_at()).unwrap();
        assert!(last >= previous);
        assert_eq!(last, purchased);
    }

    #[test]
    fn overflow_is_reported() {
        let t = timeline(VESTING);
        let mid = END + DELAY + VESTING / 2;
        assert_eq!(
            claimable_amount(&t, true, i128::MAX, 0, mid),
            Err(Error::ArithmeticOverflow)
        );
    }

    #[test]
    fn saturating_dates_do_not_wrap() {
        let t = Timeline {
            start_date: 0,
            end_date: u64::MAX - 10,
            release_delay: 100,
            vesting_duration: 100,
        };
        assert_eq!(t.claim_opens_at(), u64::MAX);
        assert_eq!(t.fully_vested_at(), u64::MAX);
    }
}
