// SPDX-License-Identifier: MIT

//! Blob store and typed database wrapper.
//!
//! Persistence is a synchronous key-value blob store: whole collections are
//! serialized as JSON under a small set of well-known keys (see
//! [`crate::db::keys`]). The store offers no transactions; consistency of
//! read-modify-write cycles is the caller's job via [`Database::user_lock`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::db::keys;
use crate::error::AppError;
use crate::models::{Meal, User, UserStats};

/// Errors from the blob store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error for key '{key}': {message}")]
    Io { key: String, message: String },

    #[error("Corrupt blob for key '{key}': {message}")]
    Corrupt { key: String, message: String },
}

/// Synchronous key-value blob storage collaborator.
///
/// `load` returns `None` for a key that was never saved; `save` replaces the
/// whole blob. Implementations must be safe to call from concurrent handlers.
pub trait BlobStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store: one JSON file per key under a data directory.
///
/// Writes go to a temp file which is then renamed over the target, so a key
/// either holds the previous blob or the complete new one.
pub struct FileStore {
    dir: PathBuf,
    write_guard: Mutex<()>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            dir,
            write_guard: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            key: key.to_string(),
            message: e.to_string(),
        };

        let _guard = self.write_guard.lock().expect("file store lock poisoned");
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, self.path_for(key)).map_err(io_err)?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .blobs
            .read()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs
            .write()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed database wrapper over the blob store.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn BlobStore>,
    /// Serializes load-modify-save cycles against whole collections. The blob
    /// store has no transactions, so concurrent writers would otherwise drop
    /// each other's updates.
    mutation_guard: Arc<Mutex<()>>,
    /// Per-user mutation locks; the wider meal-then-stats read-modify-write
    /// flow for one user must hold this lock.
    user_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl Database {
    /// Open a file-backed database rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, AppError> {
        let store = FileStore::open(dir).map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// In-memory database for tests.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::default()))
    }

    pub fn with_store(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            mutation_guard: Arc::new(Mutex::new(())),
            user_locks: Arc::new(DashMap::new()),
        }
    }

    /// Mutation lock handle for a user.
    ///
    /// Handlers may run concurrently for the same user (multiple tabs, retried
    /// requests); holding this lock across a load-compute-save cycle excludes
    /// the lost-update race.
    pub fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, AppError> {
        let raw = self
            .store
            .load(key)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        match raw {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::Storage(
                    StoreError::Corrupt {
                        key: key.to_string(),
                        message: e.to_string(),
                    }
                    .to_string(),
                )
            }),
        }
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), AppError> {
        let raw = serde_json::to_string(items)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize '{key}': {e}")))?;
        self.store
            .save(key, &raw)
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self.load_collection(keys::USERS)?;
        Ok(users.into_iter().find(|u| u.id == user_id))
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let needle = email.to_lowercase();
        let users: Vec<User> = self.load_collection(keys::USERS)?;
        Ok(users.into_iter().find(|u| u.email == needle))
    }

    /// Create or update a user.
    pub fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _guard = self.mutation_guard.lock().expect("mutation guard poisoned");
        let mut users: Vec<User> = self.load_collection(keys::USERS)?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.save_collection(keys::USERS, &users)
    }

    // ─── Meal Operations ─────────────────────────────────────────

    /// All meals for a user, in insertion order.
    ///
    /// Insertion order is load-bearing: the favorite-food tally breaks ties
    /// by first-encountered name, which is defined over this ordering.
    pub fn get_user_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, AppError> {
        let meals: Vec<Meal> = self.load_collection(keys::MEALS)?;
        Ok(meals.into_iter().filter(|m| m.user_id == user_id).collect())
    }

    /// Meals for a user on one calendar day.
    pub fn get_meals_by_date(
        &self,
        user_id: Uuid,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Meal>, AppError> {
        Ok(self
            .get_user_meals(user_id)?
            .into_iter()
            .filter(|m| m.date == date)
            .collect())
    }

    pub fn insert_meal(&self, meal: &Meal) -> Result<(), AppError> {
        let _guard = self.mutation_guard.lock().expect("mutation guard poisoned");
        let mut meals: Vec<Meal> = self.load_collection(keys::MEALS)?;
        meals.push(meal.clone());
        self.save_collection(keys::MEALS, &meals)
    }

    /// Hard-delete a meal. Returns false if the meal does not exist or is not
    /// owned by `user_id`.
    pub fn delete_meal(&self, meal_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let _guard = self.mutation_guard.lock().expect("mutation guard poisoned");
        let mut meals: Vec<Meal> = self.load_collection(keys::MEALS)?;
        let before = meals.len();
        meals.retain(|m| !(m.id == meal_id && m.user_id == user_id));
        if meals.len() == before {
            return Ok(false);
        }
        self.save_collection(keys::MEALS, &meals)?;
        Ok(true)
    }

    // ─── Stats Operations ────────────────────────────────────────

    /// Get a user's stats aggregate record.
    pub fn get_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, AppError> {
        let stats: Vec<UserStats> = self.load_collection(keys::USER_STATS)?;
        Ok(stats.into_iter().find(|s| s.user_id == user_id))
    }

    /// Store a user's stats aggregate record (insert or replace).
    pub fn set_user_stats(&self, stats: &UserStats) -> Result<(), AppError> {
        let _guard = self.mutation_guard.lock().expect("mutation guard poisoned");
        let mut all: Vec<UserStats> = self.load_collection(keys::USER_STATS)?;
        match all.iter_mut().find(|s| s.user_id == stats.user_id) {
            Some(existing) => *existing = stats.clone(),
            None => all.push(stats.clone()),
        }
        self.save_collection(keys::USER_STATS, &all)
    }
}
