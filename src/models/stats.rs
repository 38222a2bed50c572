// SPDX-License-Identifier: MIT

//! User statistics aggregate for efficient dashboard queries.
//!
//! The aggregate is derived from the meal log and owned exclusively by the
//! stats service; nothing else writes it. It is updated incrementally when a
//! meal is logged and rebuilt from scratch when one is deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder until at least one meal establishes a favorite.
pub const FAVORITE_FOOD_UNSET: &str = "Not determined yet";

/// One weight measurement in the progress series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    pub date: NaiveDate,
    /// Body weight in kg
    pub weight: f64,
}

/// Pre-computed statistics for a user.
///
/// Stored under the `naijafit_user_stats` key, one record per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Owning user (unique across the stats collection)
    pub user_id: Uuid,
    /// Count of meals ever logged; exact under both update paths
    #[serde(default)]
    pub total_meals_logged: u32,
    /// Mean of per-day calorie sums over days with at least one meal
    #[serde(default)]
    pub average_daily_calories: f64,
    /// Most-logged food name across all line items
    #[serde(default)]
    pub favorite_food: String,
    /// Consecutive days ending today with at least one meal logged
    #[serde(default)]
    pub current_streak: u32,
    /// Longest run of consecutive logging days ever observed
    #[serde(default)]
    pub longest_streak: u32,
    /// Weight series, maintained by the profile flow (not by meal logging)
    #[serde(default)]
    pub weight_progress: Vec<WeightSample>,
    /// Unlocked achievement names, insertion-ordered; never shrinks
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Last recomputation timestamp (RFC3339)
    #[serde(default)]
    pub last_updated: String,
}

impl UserStats {
    /// The zeroed record created at user registration.
    pub fn initial(user_id: Uuid, now: &str) -> Self {
        Self {
            user_id,
            total_meals_logged: 0,
            average_daily_calories: 0.0,
            favorite_food: FAVORITE_FOOD_UNSET.to_string(),
            current_streak: 0,
            longest_streak: 0,
            weight_progress: Vec::new(),
            achievements: vec![crate::services::achievements::WELCOME.to_string()],
            last_updated: now.to_string(),
        }
    }
}
