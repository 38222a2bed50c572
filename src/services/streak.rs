// SPDX-License-Identifier: MIT

//! Logging-streak analysis.
//!
//! Pure functions over the set of calendar days on which a user logged at
//! least one meal. Dates are compared at day granularity; duplicates and
//! out-of-order input are handled here so callers can pass raw meal dates.

use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// Result of analyzing a user's logging history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakSummary {
    /// Consecutive days ending at `today` with at least one meal logged.
    /// Zero when nothing was logged today.
    pub current: u32,
    /// Longest run of consecutive logging days anywhere in the history.
    pub longest: u32,
}

/// Analyze a user's logged dates against a reference `today`.
///
/// Input dates may contain duplicates and arrive in any order; a future date
/// sorts normally (it can extend the longest run) but never counts toward the
/// current streak unless it equals `today`.
pub fn analyze(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    // BTreeSet gives dedup + ascending order in one pass.
    let days: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    StreakSummary {
        current: current_streak(&days, today),
        longest: longest_streak(&days),
    }
}

/// Walk backward from `today`, counting consecutive present days.
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    if !days.contains(&today) {
        return 0;
    }

    let mut streak = 1;
    let mut day = today;
    while let Some(prev) = day.checked_sub_days(Days::new(1)) {
        if !days.contains(&prev) {
            break;
        }
        streak += 1;
        day = prev;
    }
    streak
}

/// Longest run of consecutive days over the whole (sorted, distinct) set.
fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        run = match prev {
            Some(p) if p.checked_add_days(Days::new(1)) == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}
