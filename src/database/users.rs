// ABOUTME: User profile database operations
// ABOUTME: Handles registration inserts, lookups by id and e-mail, and profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{BiometricProfile, CalorieBudget, DietaryPreference, Gender, UserProfile};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, surname, email, birthdate, gender, height_cm, weight_kg, \
     waist_cm, activity_level, smoking, sleep_hours, water_liters, diabetes, hypertension, \
     dietary_preference, bmi, daily_calorie_needs, obesity_category, created_at, updated_at";

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                surname TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                birthdate TEXT NOT NULL,
                gender TEXT NOT NULL,
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                waist_cm REAL NOT NULL,
                activity_level INTEGER NOT NULL,
                smoking BOOLEAN NOT NULL DEFAULT 0,
                sleep_hours REAL NOT NULL,
                water_liters REAL NOT NULL DEFAULT 0,
                diabetes BOOLEAN NOT NULL DEFAULT 0,
                hypertension BOOLEAN NOT NULL DEFAULT 0,
                dietary_preference TEXT NOT NULL DEFAULT 'Standard',
                bmi REAL NOT NULL,
                daily_calorie_needs REAL NOT NULL,
                obesity_category TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(super) async fn insert_user(&self, user: &UserProfile) -> AppResult<Uuid> {
        let biometrics = &user.biometrics;
        sqlx::query(
            r"
            INSERT INTO users (
                id, name, surname, email, birthdate, gender, height_cm, weight_kg, waist_cm,
                activity_level, smoking, sleep_hours, water_liters, diabetes, hypertension,
                dietary_preference, bmi, daily_calorie_needs, obesity_category,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(user.birthdate)
        .bind(user.gender.as_str())
        .bind(biometrics.height_cm)
        .bind(biometrics.weight_kg)
        .bind(biometrics.waist_cm)
        .bind(i64::from(biometrics.activity_level))
        .bind(biometrics.smoking)
        .bind(biometrics.sleep_hours)
        .bind(biometrics.water_liters)
        .bind(biometrics.diabetes)
        .bind(biometrics.hypertension)
        .bind(biometrics.dietary_preference.label())
        .bind(user.budget.bmi)
        .bind(user.budget.daily_total)
        .bind(user.obesity_category.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            if error.code == ErrorCode::ResourceAlreadyExists {
                AppError::already_exists(format!("User with email {}", user.email))
            } else {
                error
            }
        })?;

        Ok(user.id)
    }

    pub(super) async fn fetch_user_by_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    pub(super) async fn fetch_user_by_email(&self, email: &str) -> AppResult<Option<UserProfile>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    pub(super) async fn update_user(&self, user: &UserProfile) -> AppResult<()> {
        let biometrics = &user.biometrics;
        let result = sqlx::query(
            r"
            UPDATE users SET
                height_cm = $2,
                weight_kg = $3,
                waist_cm = $4,
                activity_level = $5,
                smoking = $6,
                sleep_hours = $7,
                water_liters = $8,
                diabetes = $9,
                hypertension = $10,
                dietary_preference = $11,
                bmi = $12,
                daily_calorie_needs = $13,
                obesity_category = $14,
                updated_at = $15
            WHERE id = $1
            ",
        )
        .bind(user.id.to_string())
        .bind(biometrics.height_cm)
        .bind(biometrics.weight_kg)
        .bind(biometrics.waist_cm)
        .bind(i64::from(biometrics.activity_level))
        .bind(biometrics.smoking)
        .bind(biometrics.sleep_hours)
        .bind(biometrics.water_liters)
        .bind(biometrics.diabetes)
        .bind(biometrics.hypertension)
        .bind(biometrics.dietary_preference.label())
        .bind(user.budget.bmi)
        .bind(user.budget.daily_total)
        .bind(user.obesity_category.as_deref())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {}", user.id)));
        }
        Ok(())
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<UserProfile> {
        let id: String = row.try_get("id")?;
        let id = Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid user id '{id}': {e}")))?;
        let activity_level: i64 = row.try_get("activity_level")?;
        let activity_level = u8::try_from(activity_level).map_err(|_| {
            AppError::database(format!("Invalid stored activity level {activity_level}"))
        })?;
        let gender: String = row.try_get("gender")?;
        let dietary_preference: String = row.try_get("dietary_preference")?;

        Ok(UserProfile {
            id,
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            email: row.try_get("email")?,
            birthdate: row.try_get("birthdate")?,
            gender: Gender::from_str_lossy(&gender),
            biometrics: BiometricProfile {
                height_cm: row.try_get("height_cm")?,
                weight_kg: row.try_get("weight_kg")?,
                waist_cm: row.try_get("waist_cm")?,
                activity_level,
                smoking: row.try_get("smoking")?,
                sleep_hours: row.try_get("sleep_hours")?,
                water_liters: row.try_get("water_liters")?,
                diabetes: row.try_get("diabetes")?,
                hypertension: row.try_get("hypertension")?,
                dietary_preference: DietaryPreference::from_str_lossy(&dietary_preference),
            },
            budget: CalorieBudget {
                bmi: row.try_get("bmi")?,
                daily_total: row.try_get("daily_calorie_needs")?,
            },
            obesity_category: row.try_get("obesity_category")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
