// SPDX-License-Identifier: MIT

//! Stats aggregation service.
//!
//! Owns the per-user [`UserStats`] record. Two update strategies keep it
//! consistent with the meal log:
//!
//! - [`StatsService::update_after_insert`] — incremental, after a meal is
//!   persisted. `longest_streak` is kept as a high-water mark on this path.
//! - [`StatsService::recompute_full`] — rebuild from the remaining meals,
//!   after a deletion. There is no incremental-decrement path: favorite food
//!   and streak state cannot be cheaply reversed. On this path
//!   `longest_streak` is overwritten (or, with zero meals left, untouched),
//!   and achievements are never re-evaluated or revoked.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Meal, UserStats, FAVORITE_FOOD_UNSET};
use crate::services::{achievements, streak};
use crate::time_utils::{format_utc_rfc3339, today_utc};

/// Derives and maintains `UserStats` records. The only writer of the stats
/// collection.
#[derive(Clone)]
pub struct StatsService {
    db: Database,
}

impl StatsService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the zeroed stats record for a new user.
    ///
    /// Fails with [`AppError::DuplicateUser`] if the user already has one.
    pub fn initialize(&self, user_id: Uuid) -> Result<UserStats> {
        let lock = self.db.user_lock(user_id);
        let _guard = lock.lock().expect("user lock poisoned");

        if self.db.get_user_stats(user_id)?.is_some() {
            return Err(AppError::DuplicateUser(user_id));
        }

        let stats = UserStats::initial(user_id, &format_utc_rfc3339(chrono::Utc::now()));
        self.db.set_user_stats(&stats)?;

        tracing::info!(%user_id, "Initialized user stats");
        Ok(stats)
    }

    /// Incremental update after a meal insert.
    ///
    /// The meal must already be persisted; the averages, favorite food and
    /// streaks are recomputed over the full (re-queried) meal list, while
    /// `total_meals_logged` and `longest_streak` build on the stored record.
    pub fn update_after_insert(&self, user_id: Uuid, meal: &Meal) -> Result<UserStats> {
        let lock = self.db.user_lock(user_id);
        let _guard = lock.lock().expect("user lock poisoned");

        let mut stats = self
            .db
            .get_user_stats(user_id)?
            .ok_or(AppError::UserNotFound(user_id))?;

        let meals = self.db.get_user_meals(user_id)?;

        stats.total_meals_logged += 1;
        stats.average_daily_calories = average_daily_calories(&meals);
        if let Some(name) = favorite_food(&meals) {
            stats.favorite_food = name;
        }

        let summary = streak::analyze(&logged_dates(&meals), today_utc());
        stats.current_streak = summary.current;
        // High-water mark: an insert never lowers the longest streak.
        stats.longest_streak = stats.longest_streak.max(summary.longest);

        let unlocked = achievements::apply_unlocks(&mut stats);
        if !unlocked.is_empty() {
            tracing::info!(%user_id, achievements = ?unlocked, "Achievements unlocked");
        }

        stats.last_updated = format_utc_rfc3339(chrono::Utc::now());
        self.db.set_user_stats(&stats)?;

        tracing::debug!(
            %user_id,
            meal_id = %meal.id,
            total_meals = stats.total_meals_logged,
            current_streak = stats.current_streak,
            "Stats updated after meal insert"
        );
        Ok(stats)
    }

    /// Full rebuild from the remaining meals, after a deletion.
    pub fn recompute_full(&self, user_id: Uuid) -> Result<UserStats> {
        let lock = self.db.user_lock(user_id);
        let _guard = lock.lock().expect("user lock poisoned");

        let mut stats = self
            .db
            .get_user_stats(user_id)?
            .ok_or(AppError::UserNotFound(user_id))?;

        let meals = self.db.get_user_meals(user_id)?;
        stats.total_meals_logged = meals.len() as u32;

        if meals.is_empty() {
            stats.average_daily_calories = 0.0;
            stats.favorite_food = FAVORITE_FOOD_UNSET.to_string();
            stats.current_streak = 0;
            // longest_streak is a historical high-water mark; deleting every
            // meal does not erase it.
        } else {
            stats.average_daily_calories = average_daily_calories(&meals);
            stats.favorite_food =
                favorite_food(&meals).unwrap_or_else(|| FAVORITE_FOOD_UNSET.to_string());

            let summary = streak::analyze(&logged_dates(&meals), today_utc());
            stats.current_streak = summary.current;
            // Unlike the insert path, the rebuilt value replaces the stored
            // one outright, so a deletion may lower it.
            stats.longest_streak = summary.longest;
        }

        stats.last_updated = format_utc_rfc3339(chrono::Utc::now());
        self.db.set_user_stats(&stats)?;

        tracing::debug!(
            %user_id,
            total_meals = stats.total_meals_logged,
            "Stats recomputed after meal deletion"
        );
        Ok(stats)
    }

    /// Read accessor: the persisted record, or a zeroed default when the user
    /// was never initialized. Storage failures still propagate.
    pub fn get_stats(&self, user_id: Uuid) -> Result<UserStats> {
        Ok(self.db.get_user_stats(user_id)?.unwrap_or_else(|| {
            UserStats::initial(user_id, &format_utc_rfc3339(chrono::Utc::now()))
        }))
    }
}

/// Mean of per-day calorie sums over days with at least one meal.
///
/// Days with no meals are excluded from the denominator, not counted as
/// zero-calorie days.
fn average_daily_calories(meals: &[Meal]) -> f64 {
    let days = distinct_days(meals);
    if days == 0 {
        return 0.0;
    }
    let total: f64 = meals.iter().map(|m| m.total_nutrition.calories).sum();
    total / days as f64
}

fn distinct_days(meals: &[Meal]) -> usize {
    let mut dates: Vec<NaiveDate> = meals.iter().map(|m| m.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.len()
}

fn logged_dates(meals: &[Meal]) -> Vec<NaiveDate> {
    meals.iter().map(|m| m.date).collect()
}

/// The most-logged food name across all line items of all meals.
///
/// Ties break toward the name encountered first during the tally, which runs
/// in meal insertion order. Returns `None` when no line item exists.
fn favorite_food(meals: &[Meal]) -> Option<String> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for meal in meals {
        for entry in &meal.foods {
            match counts.iter_mut().find(|(name, _)| *name == entry.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((&entry.name, 1)),
            }
        }
    }

    let mut best: Option<(&str, u32)> = None;
    for (name, count) in counts {
        match best {
            // Strictly greater, so the first-encountered name wins ties.
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((name, count)),
        }
    }
    best.map(|(name, _)| name.to_string())
}
