// SPDX-License-Identifier: MIT

//! Nigerian food catalog loading and lookup.

use crate::models::Food;
use std::fs;
use std::path::Path;

/// Service holding the food catalog used to resolve and scale meal line items.
#[derive(Default, Clone)]
pub struct FoodCatalog {
    foods: Vec<Food>,
}

impl FoodCatalog {
    /// Load the catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the catalog from a JSON string (an array of food records).
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let foods: Vec<Food> =
            serde_json::from_str(json_data).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        for (i, food) in foods.iter().enumerate() {
            if foods[..i].iter().any(|f| f.id == food.id) {
                return Err(CatalogError::DuplicateId(food.id.clone()));
            }
        }

        tracing::info!(count = foods.len(), "Loaded food catalog");
        Ok(Self { foods })
    }

    /// The full catalog.
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Look up a food by its slug.
    pub fn get(&self, food_id: &str) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == food_id)
    }

    /// Case-insensitive substring search over name and category.
    pub fn search(&self, term: &str) -> Vec<&Food> {
        let needle = term.to_lowercase();
        self.foods
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&needle)
                    || f.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse food catalog: {0}")]
    ParseError(String),

    #[error("Duplicate food id in catalog: {0}")]
    DuplicateId(String),
}
