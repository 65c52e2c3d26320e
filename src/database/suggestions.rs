// ABOUTME: Per-day meal suggestion storage keyed by user, slot, and date
// ABOUTME: Enforces one stored suggestion per key and supports invalidating a user's day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{MealSlot, MealSuggestion};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the meal suggestions table
    ///
    /// Only the four meal slots may be stored; exercise answers are never cached.
    pub(super) async fn migrate_suggestions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_suggestions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                slot TEXT NOT NULL CHECK (slot IN ('breakfast', 'lunch', 'dinner', 'snack')),
                date TEXT NOT NULL,
                label TEXT NOT NULL,
                calories REAL NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, slot, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_meal_suggestions_user_date ON meal_suggestions(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub(super) async fn fetch_suggestion(
        &self,
        user_id: Uuid,
        slot: MealSlot,
        date: NaiveDate,
    ) -> AppResult<Option<MealSuggestion>> {
        let row = sqlx::query(
            r"
            SELECT user_id, slot, date, label, calories, created_at
            FROM meal_suggestions
            WHERE user_id = $1 AND slot = $2 AND date = $3
            ",
        )
        .bind(user_id.to_string())
        .bind(slot.as_str())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_suggestion).transpose()
    }

    pub(super) async fn store_suggestion(&self, suggestion: &MealSuggestion) -> AppResult<()> {
        if !suggestion.slot.is_cached() {
            return Err(AppError::invalid_input(format!(
                "{} suggestions are not stored",
                suggestion.slot
            )));
        }

        sqlx::query(
            r"
            INSERT INTO meal_suggestions (user_id, slot, date, label, calories, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(suggestion.user_id.to_string())
        .bind(suggestion.slot.as_str())
        .bind(suggestion.date)
        .bind(&suggestion.label)
        .bind(suggestion.calories)
        .bind(suggestion.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            if error.code == ErrorCode::ResourceAlreadyExists {
                AppError::already_exists(format!(
                    "{} suggestion for {}",
                    suggestion.slot, suggestion.date
                ))
                .with_user_id(suggestion.user_id)
            } else {
                error
            }
        })?;

        Ok(())
    }

    pub(super) async fn remove_suggestions(&self, user_id: Uuid, date: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM meal_suggestions WHERE user_id = $1 AND date = $2")
            .bind(user_id.to_string())
            .bind(date)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(super) async fn fetch_suggestions(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<MealSuggestion>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, slot, date, label, calories, created_at
            FROM meal_suggestions
            WHERE user_id = $1 AND date = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let mut suggestions = rows
            .iter()
            .map(row_to_suggestion)
            .collect::<AppResult<Vec<_>>>()?;
        suggestions.sort_by_key(|suggestion| suggestion.slot);
        Ok(suggestions)
    }
}

fn row_to_suggestion(row: &SqliteRow) -> AppResult<MealSuggestion> {
    let user_id: String = row.try_get("user_id")?;
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|e| AppError::database(format!("Invalid user id '{user_id}': {e}")))?;
    let slot: String = row.try_get("slot")?;
    let slot = slot
        .parse::<MealSlot>()
        .map_err(|e| AppError::database(format!("Invalid stored slot: {e}")))?;

    Ok(MealSuggestion {
        user_id,
        slot,
        date: row.try_get("date")?,
        label: row.try_get("label")?,
        calories: row.try_get("calories")?,
        created_at: row.try_get("created_at")?,
    })
}
