// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod food;
pub mod meal;
pub mod nutrition;
pub mod stats;
pub mod user;

pub use food::Food;
pub use meal::{FoodEntry, Meal, MealType};
pub use nutrition::Nutrition;
pub use stats::{UserStats, WeightSample, FAVORITE_FOOD_UNSET};
pub use user::User;
