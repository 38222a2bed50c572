//! Storage layer (key-value blob store).

pub mod store;

pub use store::{BlobStore, Database, FileStore, MemoryStore, StoreError};

/// Storage keys as constants.
pub mod keys {
    pub const USERS: &str = "naijafit_users";
    pub const MEALS: &str = "naijafit_meals";
    /// User stats aggregates (one record per user)
    pub const USER_STATS: &str = "naijafit_user_stats";
}
