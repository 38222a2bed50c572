// SPDX-License-Identifier: MIT

//! Meal logging service.
//!
//! Handles the core workflow:
//! 1. Resolve line items against the food catalog and scale nutrition
//! 2. Build the meal record (totals computed in the constructor)
//! 3. Persist the meal
//! 4. Update the user stats aggregate, best-effort
//!
//! The meal log is the source of truth; stats are a derived view. A failed
//! stats update is reported as absent stats and never unwinds the meal write
//! (a later full recompute repairs the aggregate).

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{FoodEntry, Meal, MealType, Nutrition, UserStats};
use crate::services::{FoodCatalog, StatsService};
use crate::time_utils::display_time_now;

/// A requested line item: which food, how many grams.
#[derive(Debug, Clone)]
pub struct NewMealItem {
    pub food_id: String,
    pub grams: f64,
}

/// A meal as submitted by the logging flow.
#[derive(Debug, Clone)]
pub struct NewMeal {
    pub meal_type: MealType,
    pub date: NaiveDate,
    /// Display time; stamped from the wall clock when omitted
    pub time: Option<String>,
    pub items: Vec<NewMealItem>,
}

/// Outcome of logging a meal. `stats` is `None` when the stats update failed
/// (the meal itself is persisted regardless).
#[derive(Debug)]
pub struct MealLogged {
    pub meal: Meal,
    pub stats: Option<UserStats>,
}

/// Outcome of deleting a meal.
#[derive(Debug)]
pub struct MealDeleted {
    pub stats: Option<UserStats>,
}

#[derive(Clone)]
pub struct MealService {
    db: Database,
    catalog: FoodCatalog,
    stats: StatsService,
}

impl MealService {
    pub fn new(db: Database, catalog: FoodCatalog, stats: StatsService) -> Self {
        Self { db, catalog, stats }
    }

    /// Log a meal for a user.
    pub fn log_meal(&self, user_id: Uuid, new_meal: NewMeal) -> Result<MealLogged> {
        if new_meal.items.is_empty() {
            return Err(AppError::BadRequest(
                "A meal needs at least one food item".to_string(),
            ));
        }

        let mut foods = Vec::with_capacity(new_meal.items.len());
        for item in &new_meal.items {
            if !item.grams.is_finite() || item.grams <= 0.0 {
                return Err(AppError::BadRequest(format!(
                    "Portion for '{}' must be a positive number of grams",
                    item.food_id
                )));
            }
            let food = self.catalog.get(&item.food_id).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown food: '{}'", item.food_id))
            })?;
            foods.push(FoodEntry {
                food_id: food.id.clone(),
                name: food.name.clone(),
                grams: item.grams,
                nutrition: Nutrition::scale(&food.per_100g, item.grams),
            });
        }

        let meal = Meal::new(
            user_id,
            new_meal.meal_type,
            new_meal.date,
            new_meal.time.unwrap_or_else(display_time_now),
            foods,
        );
        self.db.insert_meal(&meal)?;

        tracing::info!(
            %user_id,
            meal_id = %meal.id,
            date = %meal.date,
            calories = meal.total_nutrition.calories,
            "Meal logged"
        );

        let stats = match self.stats.update_after_insert(user_id, &meal) {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(%user_id, meal_id = %meal.id, error = %e,
                    "Stats update failed; meal remains persisted");
                None
            }
        };

        Ok(MealLogged { meal, stats })
    }

    /// Delete a meal. Returns `None` when the meal does not exist or is not
    /// owned by `user_id`.
    pub fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> Result<Option<MealDeleted>> {
        if !self.db.delete_meal(meal_id, user_id)? {
            return Ok(None);
        }

        tracing::info!(%user_id, %meal_id, "Meal deleted");

        let stats = match self.stats.recompute_full(user_id) {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(%user_id, %meal_id, error = %e,
                    "Stats recompute failed; deletion stands");
                None
            }
        };

        Ok(Some(MealDeleted { stats }))
    }

    /// Meals for a user, optionally bounded by an inclusive date range,
    /// newest date first.
    pub fn meals_for(
        &self,
        user_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Meal>> {
        let mut meals = self.db.get_user_meals(user_id)?;
        if let Some(from) = from {
            meals.retain(|m| m.date >= from);
        }
        if let Some(to) = to {
            meals.retain(|m| m.date <= to);
        }
        meals.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(meals)
    }

    /// Meals for one calendar day, for the daily dashboard.
    pub fn meals_on(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<Meal>> {
        self.db.get_meals_by_date(user_id, date)
    }
}
