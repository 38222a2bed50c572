// SPDX-License-Identifier: MIT

//! NaijaFit Tracker: log Nigerian meals, derive nutrition statistics
//!
//! This crate provides the backend API for the meal log and the user
//! statistics engine (daily-calorie averages, favorite food, logging streaks,
//! achievements).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{FoodCatalog, MealService, StatsService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub catalog: FoodCatalog,
    pub stats_service: StatsService,
    pub meal_service: MealService,
}
