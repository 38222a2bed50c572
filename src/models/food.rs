// SPDX-License-Identifier: MIT

//! Food catalog entry model.

use serde::{Deserialize, Serialize};

use crate::models::Nutrition;

/// One food in the Nigerian food catalog.
///
/// Nutrient values are per 100g; a logged portion is scaled from these via
/// [`Nutrition::scale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Stable slug used as the catalog key (e.g. "jollof-rice")
    pub id: String,
    /// Display name (e.g. "Jollof Rice")
    pub name: String,
    /// Category for browsing (Staples, Proteins, Soups, ...)
    pub category: String,
    /// Typical serving description (e.g. "1 cup")
    pub serving: String,
    /// Nutrient profile per 100g
    pub per_100g: Nutrition,
}
