// ABOUTME: Route handlers for user registration, profile lookup, updates, and the day plan
// ABOUTME: Parses unit-suffixed biometric fields and delegates to the recommendation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! User routes
//!
//! Users are addressed by id in the path. Request bodies keep the field names
//! of the web front end (`activityLevel`, `dietPref`, ...); biometric fields
//! may be numbers or strings with a unit suffix such as `"175 cm"`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use uuid::Uuid;

use crate::constants::units;
use crate::errors::{AppError, AppResult};
use crate::models::{BiometricProfile, DietaryPreference, Gender, MealSuggestion, Measurement};
use crate::resources::ServerResources;
use crate::services::{NewUser, UserSummary};

/// Biometric fields shared by registration and profile updates
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricsBody {
    /// Height, e.g. `"175 cm"`
    #[serde(default)]
    pub height: Option<Measurement>,
    /// Weight, e.g. `"70 kg"`
    #[serde(default)]
    pub weight: Option<Measurement>,
    /// Waist circumference, e.g. `"80 cm"`
    #[serde(default)]
    pub waist: Option<Measurement>,
    /// Activity level 1 through 5
    #[serde(default)]
    pub activity_level: Option<Measurement>,
    /// Nightly sleep in hours
    #[serde(default)]
    pub sleep_duration: Option<Measurement>,
    /// Daily water in liters; absent or empty means 0
    #[serde(default)]
    pub water_intake: Option<Measurement>,
    /// Smoker
    #[serde(default)]
    pub smoke: bool,
    /// Diagnosed diabetes
    #[serde(default)]
    pub diabetes: bool,
    /// Diagnosed hypertension
    #[serde(default)]
    pub hypertension: bool,
    /// Dietary preference; unknown values mean Standard
    #[serde(default)]
    pub diet_pref: Option<String>,
}

impl BiometricsBody {
    /// Strip units and convert into a biometric profile
    ///
    /// # Errors
    ///
    /// Returns a missing-field error for an absent measurement, or an
    /// invalid-input error naming the first unusable field
    pub fn parse(&self) -> AppResult<BiometricProfile> {
        let water_liters = match &self.water_intake {
            Some(water) => water.value_or("waterIntake", units::LITERS, 0.0)?,
            None => 0.0,
        };

        Ok(BiometricProfile {
            height_cm: required(self.height.as_ref(), "height")?
                .value("height", units::CENTIMETERS)?,
            weight_kg: required(self.weight.as_ref(), "weight")?
                .value("weight", units::KILOGRAMS)?,
            waist_cm: required(self.waist.as_ref(), "waist")?
                .value("waist", units::CENTIMETERS)?,
            activity_level: required(self.activity_level.as_ref(), "activityLevel")?
                .level("activityLevel")?,
            smoking: self.smoke,
            sleep_hours: required(self.sleep_duration.as_ref(), "sleepDuration")?
                .value("sleepDuration", units::HOURS)?,
            water_liters,
            diabetes: self.diabetes,
            hypertension: self.hypertension,
            dietary_preference: self
                .diet_pref
                .as_deref()
                .map_or(DietaryPreference::Standard, DietaryPreference::from_str_lossy),
        })
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Given name
    #[serde(default)]
    pub name: String,
    /// Family name
    #[serde(default)]
    pub surname: String,
    /// Contact e-mail
    #[serde(default)]
    pub email: String,
    /// Date of birth as `YYYY-MM-DD`
    #[serde(default)]
    pub birthdate: String,
    /// `male` or `female`
    #[serde(default)]
    pub gender: String,
    /// Measurements
    #[serde(flatten)]
    pub biometrics: BiometricsBody,
}

impl RegisterRequest {
    /// Validate field formats and build the service input
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a malformed birthdate or biometric field
    pub fn into_new_user(self) -> AppResult<NewUser> {
        let biometrics = self.biometrics.parse()?;
        Ok(NewUser {
            birthdate: parse_birthdate(&self.birthdate)?,
            gender: Gender::from_str_lossy(&self.gender),
            name: self.name.trim().to_owned(),
            surname: self.surname.trim().to_owned(),
            email: self.email.trim().to_lowercase(),
            biometrics,
        })
    }
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Status message
    pub message: String,
    /// New user id
    pub user_id: Uuid,
    /// Registered e-mail
    pub email: String,
    /// Stored BMI
    pub bmi: f64,
    /// Stored daily calorie target
    pub daily_calorie_needs: f64,
}

/// Full profile as shown on the home page
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// User id
    pub id: Uuid,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Contact e-mail
    pub email: String,
    /// Date of birth
    pub birthdate: NaiveDate,
    /// Whole years today
    pub age: u32,
    /// Gender label
    pub gender: String,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    /// Waist in cm
    pub waist: f64,
    /// Activity level 1 through 5
    pub activity_level: u8,
    /// Smoker
    pub smoking_status: bool,
    /// Diagnosed diabetes
    pub diabetes: bool,
    /// Diagnosed hypertension
    pub hypertension: bool,
    /// Sleep in hours
    pub sleep_duration: f64,
    /// Water in liters
    pub water_intake: f64,
    /// Dietary preference label
    pub dietary_preferences: String,
    /// Stored BMI
    pub bmi: f64,
    /// Stored daily calorie target
    pub daily_calorie_needs: f64,
    /// Latest obesity label, if predicted
    pub obesity_prediction: Option<String>,
}

impl From<UserSummary> for UserInfoResponse {
    fn from(summary: UserSummary) -> Self {
        let UserSummary { profile, age } = summary;
        let biometrics = profile.biometrics;
        Self {
            id: profile.id,
            name: profile.name,
            surname: profile.surname,
            email: profile.email,
            birthdate: profile.birthdate,
            age,
            gender: profile.gender.as_str().to_owned(),
            height: biometrics.height_cm,
            weight: biometrics.weight_kg,
            waist: biometrics.waist_cm,
            activity_level: biometrics.activity_level,
            smoking_status: biometrics.smoking,
            diabetes: biometrics.diabetes,
            hypertension: biometrics.hypertension,
            sleep_duration: biometrics.sleep_hours,
            water_intake: biometrics.water_liters,
            dietary_preferences: biometrics.dietary_preference.label().to_owned(),
            bmi: profile.budget.bmi,
            daily_calorie_needs: profile.budget.daily_total,
            obesity_prediction: profile.obesity_category,
        }
    }
}

/// Updated profile returned after the day's meals were regenerated
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    /// Weight in kg
    pub weight: f64,
    /// Height in cm
    pub height: f64,
    /// Waist in cm
    pub waist: f64,
    /// Water in liters
    pub water_intake: f64,
    /// Dietary preference label
    pub diet_pref: String,
    /// Smoker
    pub smoke: bool,
    /// Sleep in hours
    pub sleep_duration: f64,
    /// Activity level 1 through 5
    pub activity_level: u8,
    /// Diagnosed diabetes
    pub diabetes: bool,
    /// Diagnosed hypertension
    pub hypertension: bool,
    /// Recomputed BMI
    pub bmi: f64,
    /// Recomputed daily calorie target
    #[serde(rename = "daily_calorie_needs")]
    pub daily_calorie_needs: f64,
    /// Whole years today
    pub age: u32,
    /// Regenerated meal suggestions keyed `<slot>_suggestion`
    pub suggestions: Map<String, serde_json::Value>,
}

/// Stored suggestions for one day
#[derive(Debug, Serialize, Deserialize)]
pub struct DayPlanResponse {
    /// Day the plan belongs to
    pub date: NaiveDate,
    /// Suggestions in slot order
    pub suggestions: Vec<MealSuggestion>,
    /// Sum of the assigned meal calories
    pub total_calories: f64,
}

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::handle_register))
            .route(
                "/api/users/:user_id",
                get(Self::handle_get).put(Self::handle_update),
            )
            .route("/api/users/:user_id/plan", get(Self::handle_plan))
            .with_state(resources)
    }

    /// Handle POST /api/users - Register a user
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let new_user = body.into_new_user()?;
        let profile = resources
            .recommendations
            .register_user(new_user, today())
            .await?;

        let response = RegisterResponse {
            message: "User created successfully".to_owned(),
            user_id: profile.id,
            email: profile.email,
            bmi: profile.budget.bmi,
            daily_calorie_needs: profile.budget.daily_total,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/users/:user_id - Profile with derived age
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let summary = resources.recommendations.user_info(user_id, today()).await?;

        let response: UserInfoResponse = summary.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/users/:user_id - Update biometrics and regenerate today's meals
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Json(body): Json<BiometricsBody>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let biometrics = body.parse()?;
        let today = today();

        let service = &resources.recommendations;
        let UserSummary { profile, age } =
            service.update_profile(user_id, biometrics, today).await?;
        let suggestions = service.refresh_day(user_id, today).await?;

        let biometrics = profile.biometrics;
        let response = UpdateProfileResponse {
            weight: biometrics.weight_kg,
            height: biometrics.height_cm,
            waist: biometrics.waist_cm,
            water_intake: biometrics.water_liters,
            diet_pref: biometrics.dietary_preference.label().to_owned(),
            smoke: biometrics.smoking,
            sleep_duration: biometrics.sleep_hours,
            activity_level: biometrics.activity_level,
            diabetes: biometrics.diabetes,
            hypertension: biometrics.hypertension,
            bmi: profile.budget.bmi,
            daily_calorie_needs: profile.budget.daily_total,
            age,
            suggestions: suggestions
                .into_iter()
                .map(|s| (s.slot.response_key().to_owned(), s.label.into()))
                .collect(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:user_id/plan - Today's stored suggestions
    async fn handle_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let date = today();
        let suggestions = resources.recommendations.day_plan(user_id, date).await?;

        let response = DayPlanResponse {
            date,
            total_calories: suggestions.iter().map(|s| s.calories).sum(),
            suggestions,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

/// Parse a user id path segment
///
/// # Errors
///
/// Returns an invalid-format error when the segment is not a UUID
pub fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::invalid_format("user_id", format!("'{raw}' is not a valid id")))
}

/// Current UTC calendar day
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn required<'a>(field: Option<&'a Measurement>, name: &str) -> AppResult<&'a Measurement> {
    field.ok_or_else(|| AppError::missing_field(name))
}

fn parse_birthdate(raw: &str) -> AppResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field("birthdate"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_format("birthdate", format!("'{raw}' is not YYYY-MM-DD")))
}
