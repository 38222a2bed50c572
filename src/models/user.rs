//! User model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique identifier (also the stats record key)
    pub id: Uuid,
    /// Email address, lowercased, unique
    pub email: String,
    /// Full display name
    pub full_name: String,
    /// When the user registered (RFC3339)
    pub created_at: String,
}
