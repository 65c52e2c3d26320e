// ABOUTME: User profile model with biometric snapshot and derived calorie budget
// ABOUTME: UserProfile is the stored record, BiometricProfile the updatable measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::biometrics::{DietaryPreference, Gender, ObesityCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measurements and lifestyle factors a user may update after registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Waist circumference in centimeters
    pub waist_cm: f64,
    /// Activity level, expected in 1..=5
    pub activity_level: u8,
    /// Whether the user smokes
    pub smoking: bool,
    /// Average nightly sleep in hours
    pub sleep_hours: f64,
    /// Average daily water intake in liters
    pub water_liters: f64,
    /// Diagnosed diabetes
    pub diabetes: bool,
    /// Diagnosed hypertension
    pub hypertension: bool,
    /// Dietary preference
    pub dietary_preference: DietaryPreference,
}

/// Derived calorie figures, recomputed whenever a biometric input changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieBudget {
    /// Body mass index rounded to two decimals
    pub bmi: f64,
    /// Daily calorie target rounded to a whole calorie
    pub daily_total: f64,
}

/// Stored user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier
    pub id: Uuid,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Contact e-mail, unique across users
    pub email: String,
    /// Date of birth; age is derived from it per request
    pub birthdate: NaiveDate,
    /// Gender as supplied at registration
    pub gender: Gender,
    /// Current biometric snapshot
    pub biometrics: BiometricProfile,
    /// Calorie budget derived from `biometrics`
    pub budget: CalorieBudget,
    /// Latest obesity model label, if a prediction was requested
    pub obesity_category: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last profile change
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Parsed obesity category; unknown or absent labels yield `None`
    #[must_use]
    pub fn obesity(&self) -> Option<ObesityCategory> {
        self.obesity_category
            .as_deref()
            .and_then(ObesityCategory::from_label)
    }
}
