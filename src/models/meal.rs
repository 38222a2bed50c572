// SPDX-License-Identifier: MIT

//! Logged meal model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Nutrition;
use crate::time_utils::format_utc_rfc3339;

/// Which meal of the day a record counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One line item of a meal: a food portion with its already-scaled nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Catalog slug of the food
    pub food_id: String,
    /// Display name, denormalized so the meal log survives catalog edits
    pub name: String,
    /// Portion weight in grams
    pub grams: f64,
    /// Absolute nutrient bundle for this portion
    pub nutrition: Nutrition,
}

/// Stored meal record.
///
/// Immutable once created; the only lifecycle transition is a hard delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Opaque unique identifier, assigned at creation
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// breakfast / lunch / dinner / snack
    #[serde(rename = "type")]
    pub meal_type: MealType,
    /// Calendar day the meal counts toward (day granularity, no time part)
    pub date: NaiveDate,
    /// Display-only wall-clock time (e.g. "07:30 AM"); never used in
    /// aggregation
    pub time: String,
    /// Ordered line items
    pub foods: Vec<FoodEntry>,
    /// Element-wise sum of `foods[*].nutrition`, computed once at creation
    pub total_nutrition: Nutrition,
    /// When this record was created (RFC3339)
    pub created_at: String,
}

impl Meal {
    /// Build a meal from its line items.
    ///
    /// This is the only constructor: `total_nutrition` is derived here and
    /// nowhere else, so it always equals the sum of the line items.
    pub fn new(
        user_id: Uuid,
        meal_type: MealType,
        date: NaiveDate,
        time: String,
        foods: Vec<FoodEntry>,
    ) -> Self {
        let mut total_nutrition = Nutrition::default();
        for entry in &foods {
            total_nutrition += entry.nutrition;
        }

        Self {
            id: Uuid::new_v4(),
            user_id,
            meal_type,
            date,
            time,
            foods,
            total_nutrition,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        }
    }
}
