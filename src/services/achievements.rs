// SPDX-License-Identifier: MIT

//! Achievement rule set.
//!
//! A fixed, ordered table of threshold predicates over [`UserStats`],
//! evaluated after every insert-path stats update. Unlocks are append-only:
//! a name is added once and never removed, even if a later recomputation
//! would no longer qualify.

use crate::models::UserStats;

/// Granted at registration, before any meal is logged.
pub const WELCOME: &str = "Welcome";
pub const FIRST_MEAL_LOGGED: &str = "First Meal Logged";
pub const CONSISTENT_LOGGER: &str = "Consistent Logger";
pub const WEEK_WARRIOR: &str = "Week Warrior";
pub const MONTHLY_MASTER: &str = "Monthly Master";

/// The rule table, in evaluation order.
///
/// Count rules use exact equality so they fire on the exact crossing call;
/// streak rules use `>=` and may fire on any later call, after which the
/// already-present name keeps them from re-firing.
const RULES: &[(&str, fn(&UserStats) -> bool)] = &[
    (FIRST_MEAL_LOGGED, |s| s.total_meals_logged == 1),
    (CONSISTENT_LOGGER, |s| s.total_meals_logged == 10),
    (WEEK_WARRIOR, |s| s.current_streak >= 7),
    (MONTHLY_MASTER, |s| s.longest_streak >= 30),
];

/// Append every newly-qualified achievement to `stats.achievements`.
///
/// Idempotent: running twice against the same state unlocks nothing new.
/// Returns the names unlocked by this call.
pub fn apply_unlocks(stats: &mut UserStats) -> Vec<&'static str> {
    let mut unlocked = Vec::new();
    for (name, qualifies) in RULES {
        if qualifies(stats) && !stats.achievements.iter().any(|a| a == name) {
            stats.achievements.push(name.to_string());
            unlocked.push(*name);
        }
    }
    unlocked
}
