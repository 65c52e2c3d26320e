// ABOUTME: Storage layer for user profiles and per-day meal suggestions
// ABOUTME: DatabaseProvider trait plus its SQLite implementation with idempotent migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! [`DatabaseProvider`] is the storage contract the recommendation service
//! depends on. [`Database`] implements it over `SQLite`.

mod suggestions;
mod users;

use crate::config::environment::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::models::{MealSlot, MealSuggestion, UserProfile};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Storage abstraction used by the recommendation service
///
/// Implementations must enforce at most one suggestion per (user, slot, date).
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Run migrations to set up schema
    async fn migrate(&self) -> AppResult<()>;

    /// Verify the store is reachable
    async fn health_check(&self) -> AppResult<()>;

    // ================================
    // User Management
    // ================================

    /// Insert a new user; a duplicate e-mail is `ResourceAlreadyExists`
    async fn create_user(&self, user: &UserProfile) -> AppResult<Uuid>;

    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Get user by e-mail address
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<UserProfile>>;

    /// Overwrite an existing user's mutable fields
    async fn save_user(&self, user: &UserProfile) -> AppResult<()>;

    // ================================
    // Meal Suggestions
    // ================================

    /// Suggestion stored for (user, slot, date), if any
    async fn find_suggestion(
        &self,
        user_id: Uuid,
        slot: MealSlot,
        date: NaiveDate,
    ) -> AppResult<Option<MealSuggestion>>;

    /// Store a new suggestion; an existing row for the same key is `ResourceAlreadyExists`
    async fn insert_suggestion(&self, suggestion: &MealSuggestion) -> AppResult<()>;

    /// Delete every suggestion of a user for a date, returning how many were removed
    async fn delete_suggestions(&self, user_id: Uuid, date: NaiveDate) -> AppResult<u64>;

    /// All suggestions of a user for a date, in slot order
    async fn list_suggestions(&self, user_id: Uuid, date: NaiveDate)
        -> AppResult<Vec<MealSuggestion>>;
}

/// `SQLite`-backed storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a database connection and run migrations
    ///
    /// In-memory databases use a single connection so every query sees the
    /// same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unsupported, the file cannot be
    /// created, or migrations fail
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?;

        let pool = match &url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .connect(&url.to_connection_string())
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path).await?;
                // Ensure SQLite creates the database file if it doesn't exist
                let connection_options = format!("{}?mode=rwc", url.to_connection_string());
                SqlitePoolOptions::new().connect(&connection_options).await?
            }
        };

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database initialized");
        Ok(db)
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_suggestions().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, user: &UserProfile) -> AppResult<Uuid> {
        self.insert_user(user).await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.fetch_user_by_id(user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<UserProfile>> {
        self.fetch_user_by_email(email).await
    }

    async fn save_user(&self, user: &UserProfile) -> AppResult<()> {
        self.update_user(user).await
    }

    async fn find_suggestion(
        &self,
        user_id: Uuid,
        slot: MealSlot,
        date: NaiveDate,
    ) -> AppResult<Option<MealSuggestion>> {
        self.fetch_suggestion(user_id, slot, date).await
    }

    async fn insert_suggestion(&self, suggestion: &MealSuggestion) -> AppResult<()> {
        self.store_suggestion(suggestion).await
    }

    async fn delete_suggestions(&self, user_id: Uuid, date: NaiveDate) -> AppResult<u64> {
        self.remove_suggestions(user_id, date).await
    }

    async fn list_suggestions(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<MealSuggestion>> {
        self.fetch_suggestions(user_id, date).await
    }
}
