// ABOUTME: Recommendation orchestration over the calorie engine, classifiers, and storage
// ABOUTME: Serves per-day cached meal suggestions and invalidates them on profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Service
//!
//! Each meal slot moves from "no suggestion" to "suggested" once per user and
//! day: the first request runs the slot's classifier and stores the answer,
//! later requests return the stored row untouched. Exercise is never stored
//! and is recomputed on every request.
//!
//! A profile update deletes the day's suggestions. The caller then runs
//! [`RecommendationService::refresh_day`] to regenerate the four meals; the
//! service holds no per-user lock, so concurrent updates for one user must be
//! serialized by the caller.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use mealplan_intelligence::features::{
    assemble_obesity_features, assemble_slot_features, slot_calories, ModelSchema,
};
use mealplan_intelligence::{age_on, calculate_calorie_budget, CalorieConfig};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::classifiers::ClassifierSet;
use crate::database::DatabaseProvider;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{BiometricProfile, Gender, MealSlot, MealSuggestion, UserProfile};

/// Longest plausible nightly sleep
const MAX_SLEEP_HOURS: f64 = 24.0;

/// Validated registration input
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Contact e-mail
    pub email: String,
    /// Date of birth
    pub birthdate: NaiveDate,
    /// Gender; only male and female can be registered
    pub gender: Gender,
    /// Initial measurements
    pub biometrics: BiometricProfile,
}

/// A stored profile together with the age derived for the request date
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    /// Stored profile
    pub profile: UserProfile,
    /// Whole years on the request date
    pub age: u32,
}

/// Orchestrates calorie budgets, classifiers, and suggestion storage
pub struct RecommendationService {
    database: Arc<dyn DatabaseProvider>,
    classifiers: ClassifierSet,
    config: CalorieConfig,
}

impl RecommendationService {
    /// Create a service over injected storage and classifiers
    #[must_use]
    pub fn new(
        database: Arc<dyn DatabaseProvider>,
        classifiers: ClassifierSet,
        config: CalorieConfig,
    ) -> Self {
        Self {
            database,
            classifiers,
            config,
        }
    }

    /// Calorie engine constants in use
    #[must_use]
    pub const fn config(&self) -> &CalorieConfig {
        &self.config
    }

    /// Register a user and store the derived calorie budget
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for unusable biometrics, a gender other
    /// than male or female, or a birthdate after `today`; `ResourceAlreadyExists`
    /// when the e-mail is taken
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register_user(&self, new_user: NewUser, today: NaiveDate) -> AppResult<UserProfile> {
        validate_identity(&new_user)?;
        validate_biometrics(&new_user.biometrics)?;
        let age = age_on(new_user.birthdate, today)?;
        let budget = calculate_calorie_budget(&new_user.biometrics, age, new_user.gender, &self.config)?;

        if self.database.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "User with email {}",
                new_user.email
            )));
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            name: new_user.name,
            surname: new_user.surname,
            email: new_user.email,
            birthdate: new_user.birthdate,
            gender: new_user.gender,
            biometrics: new_user.biometrics,
            budget,
            obesity_category: None,
            created_at: now,
            updated_at: now,
        };

        self.database.create_user(&profile).await?;
        info!(
            user_id = %profile.id,
            bmi = budget.bmi,
            daily_calorie_needs = budget.daily_total,
            "User registered"
        );
        Ok(profile)
    }

    /// Stored profile with its age on `today`
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user
    pub async fn user_info(&self, user_id: Uuid, today: NaiveDate) -> AppResult<UserSummary> {
        let profile = self.load_user(user_id).await?;
        let age = age_on(profile.birthdate, today)?;
        Ok(UserSummary { profile, age })
    }

    /// Suggestion for one slot on `today`
    ///
    /// Meal slots return the stored suggestion when one exists; otherwise the
    /// slot classifier runs and its answer is stored. Exercise always runs the
    /// classifier and is never stored.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user, an invalid-input error
    /// when the profile cannot produce features (before any classifier call),
    /// or a prediction error when the classifier fails (nothing is stored)
    #[instrument(skip(self))]
    pub async fn suggest(
        &self,
        user_id: Uuid,
        slot: MealSlot,
        today: NaiveDate,
    ) -> AppResult<MealSuggestion> {
        let profile = self.load_user(user_id).await?;
        self.suggest_for(&profile, slot, today).await
    }

    /// Predict and store the user's obesity category
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user, an invalid-input error
    /// for unusable biometrics, or a prediction error from the classifier
    #[instrument(skip(self))]
    pub async fn predict_obesity(&self, user_id: Uuid, today: NaiveDate) -> AppResult<String> {
        let mut profile = self.load_user(user_id).await?;
        let features = assemble_obesity_features(&profile, today)?;
        let input = ModelSchema::obesity().encode(&features);

        let label = self
            .classifiers
            .obesity()
            .predict(&input)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;

        profile.obesity_category = Some(label.clone());
        profile.updated_at = Utc::now();
        self.database.save_user(&profile).await?;
        info!(%user_id, %label, "Obesity category stored");
        Ok(label)
    }

    /// Replace the user's biometrics and invalidate today's suggestions
    ///
    /// The calorie budget is recomputed and stored with the new measurements.
    /// Call [`Self::refresh_day`] afterwards to regenerate the meals.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user or an invalid-input error
    /// for unusable biometrics, in which case nothing is changed
    #[instrument(skip(self, biometrics))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        biometrics: BiometricProfile,
        today: NaiveDate,
    ) -> AppResult<UserSummary> {
        validate_biometrics(&biometrics)?;
        let mut profile = self.load_user(user_id).await?;
        let age = age_on(profile.birthdate, today)?;
        let budget = calculate_calorie_budget(&biometrics, age, profile.gender, &self.config)?;

        profile.biometrics = biometrics;
        profile.budget = budget;
        profile.updated_at = Utc::now();
        self.database.save_user(&profile).await?;

        let removed = self.database.delete_suggestions(user_id, today).await?;
        info!(
            %user_id,
            bmi = budget.bmi,
            daily_calorie_needs = budget.daily_total,
            removed,
            "Profile updated, suggestions invalidated"
        );
        Ok(UserSummary { profile, age })
    }

    /// Produce today's suggestion for each of the four meal slots
    ///
    /// # Errors
    ///
    /// Returns the first error of any slot; slots completed before it stay stored
    pub async fn refresh_day(&self, user_id: Uuid, today: NaiveDate) -> AppResult<Vec<MealSuggestion>> {
        let profile = self.load_user(user_id).await?;
        let mut suggestions = Vec::with_capacity(MealSlot::MEALS.len());
        for slot in MealSlot::MEALS {
            suggestions.push(self.suggest_for(&profile, slot, today).await?);
        }
        debug!(%user_id, %today, "Day refreshed");
        Ok(suggestions)
    }

    /// Stored meal suggestions of a user for `date`, in slot order
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user
    pub async fn day_plan(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<MealSuggestion>> {
        self.load_user(user_id).await?;
        self.database.list_suggestions(user_id, date).await
    }

    async fn load_user(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")).with_user_id(user_id))
    }

    async fn suggest_for(
        &self,
        profile: &UserProfile,
        slot: MealSlot,
        today: NaiveDate,
    ) -> AppResult<MealSuggestion> {
        if slot.is_cached() {
            if let Some(existing) = self.database.find_suggestion(profile.id, slot, today).await? {
                debug!(user_id = %profile.id, %slot, "Returning stored suggestion");
                return Ok(existing);
            }
        }

        let daily_total = stored_daily_total(profile)?;
        let features = assemble_slot_features(profile, daily_total, slot, today, &self.config)?;
        let input = ModelSchema::meal(slot).encode(&features);

        let label = self
            .classifiers
            .for_slot(slot)
            .predict(&input)
            .await
            .map_err(|e| {
                warn!(user_id = %profile.id, %slot, error = %e, "Classifier failed");
                AppError::from(e).with_user_id(profile.id)
            })?;

        let calories = slot_calories(daily_total, slot, &self.config);
        let suggestion = MealSuggestion::new(profile.id, slot, today, label, calories);
        if slot.is_cached() {
            if let Err(error) = self.database.insert_suggestion(&suggestion).await {
                return self.stored_after_conflict(profile.id, slot, today, error).await;
            }
        }
        info!(user_id = %profile.id, %slot, label = %suggestion.label, "Suggestion produced");
        Ok(suggestion)
    }

    /// Resolve an insert conflict with the row a concurrent request stored first
    async fn stored_after_conflict(
        &self,
        user_id: Uuid,
        slot: MealSlot,
        today: NaiveDate,
        error: AppError,
    ) -> AppResult<MealSuggestion> {
        if error.code != ErrorCode::ResourceAlreadyExists {
            return Err(error);
        }
        match self.database.find_suggestion(user_id, slot, today).await? {
            Some(stored) => {
                debug!(%user_id, %slot, "Suggestion stored concurrently, returning stored row");
                Ok(stored)
            }
            None => Err(error),
        }
    }
}

/// Daily budget stored with the profile, checked before any classifier call
fn stored_daily_total(profile: &UserProfile) -> AppResult<f64> {
    if matches!(profile.gender, Gender::Other) {
        return Err(AppError::invalid_input(format!(
            "Unsupported gender '{}' for user {}",
            profile.gender, profile.id
        )));
    }
    let daily_total = profile.budget.daily_total;
    if !daily_total.is_finite() || daily_total <= 0.0 {
        return Err(AppError::out_of_range(format!(
            "Stored daily calorie needs {daily_total} are not usable"
        )));
    }
    Ok(daily_total)
}

fn validate_identity(new_user: &NewUser) -> AppResult<()> {
    if new_user.name.trim().is_empty() {
        return Err(AppError::missing_field("name"));
    }
    if new_user.surname.trim().is_empty() {
        return Err(AppError::missing_field("surname"));
    }
    let email = new_user.email.trim();
    if email.is_empty() {
        return Err(AppError::missing_field("email"));
    }
    if !email.contains('@') {
        return Err(AppError::invalid_format("email", "expected an e-mail address"));
    }
    Ok(())
}

fn validate_biometrics(biometrics: &BiometricProfile) -> AppResult<()> {
    if biometrics.waist_cm <= 0.0 {
        return Err(AppError::out_of_range("Waist must be positive"));
    }
    if !(0.0..=MAX_SLEEP_HOURS).contains(&biometrics.sleep_hours) {
        return Err(AppError::out_of_range(format!(
            "Sleep duration must be between 0 and {MAX_SLEEP_HOURS} hours"
        )));
    }
    if biometrics.water_liters < 0.0 {
        return Err(AppError::out_of_range("Water intake cannot be negative"));
    }
    Ok(())
}
