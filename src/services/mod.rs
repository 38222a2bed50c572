// SPDX-License-Identifier: MIT

//! Business logic services.

pub mod achievements;
pub mod catalog;
pub mod meals;
pub mod stats;
pub mod streak;

pub use catalog::FoodCatalog;
pub use meals::MealService;
pub use stats::StatsService;
pub use streak::StreakSummary;
