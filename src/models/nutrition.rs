// SPDX-License-Identifier: MIT

//! Macro/micro-nutrient bundle and the per-100g scaler.

use serde::{Deserialize, Serialize};

/// Absolute nutrient amounts for a food portion or a whole meal.
///
/// Macros are grams, calories are kcal, iron is mg, vitamin A is µg.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub iron: f64,
    #[serde(default)]
    pub vitamin_a: f64,
}

impl Nutrition {
    /// Scale a per-100g nutrient profile to an absolute portion of `grams`.
    pub fn scale(per_100g: &Nutrition, grams: f64) -> Nutrition {
        let factor = grams / 100.0;
        Nutrition {
            calories: per_100g.calories * factor,
            protein: per_100g.protein * factor,
            carbs: per_100g.carbs * factor,
            fats: per_100g.fats * factor,
            fiber: per_100g.fiber * factor,
            iron: per_100g.iron * factor,
            vitamin_a: per_100g.vitamin_a * factor,
        }
    }
}

impl std::ops::AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Nutrition) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fats += rhs.fats;
        self.fiber += rhs.fiber;
        self.iron += rhs.iron;
        self.vitamin_a += rhs.vitamin_a;
    }
}
