// ABOUTME: Categorical biometric types used by the calorie engine and classifiers
// ABOUTME: Gender, ActivityLevel, DietaryPreference, and ObesityCategory with lossy label parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender as supplied at registration
///
/// Only `Male` and `Female` are accepted by the BMR formula. Any other value is
/// kept as `Other` so feature assembly can still encode it as non-male.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    /// Male (+5 BMR constant)
    Male,
    /// Female (-161 BMR constant)
    Female,
    /// Any other value
    Other,
}

impl Gender {
    /// Parse gender from string, mapping unknown values to `Other`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Whether the male indicator feature is set
    #[must_use]
    pub const fn is_male(self) -> bool {
        matches!(self, Self::Male)
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Self::from_str_lossy(&value)
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for the daily energy multiplier (levels 1 through 5)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    /// 1: little or no exercise
    Sedentary,
    /// 2: light exercise 1-3 days/week
    LightlyActive,
    /// 3: moderate exercise 3-5 days/week
    ModeratelyActive,
    /// 4: hard exercise 6-7 days/week
    VeryActive,
    /// 5: very hard exercise plus physical job
    ExtraActive,
}

impl ActivityLevel {
    /// Map a numeric level onto the enumeration
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for any level outside 1..=5
    pub fn from_level(level: u8) -> AppResult<Self> {
        match level {
            1 => Ok(Self::Sedentary),
            2 => Ok(Self::LightlyActive),
            3 => Ok(Self::ModeratelyActive),
            4 => Ok(Self::VeryActive),
            5 => Ok(Self::ExtraActive),
            other => Err(AppError::out_of_range(format!(
                "Activity level must be between 1 and 5, got {other}"
            ))),
        }
    }

    /// Numeric level as used by the classifiers
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Sedentary => 1,
            Self::LightlyActive => 2,
            Self::ModeratelyActive => 3,
            Self::VeryActive => 4,
            Self::ExtraActive => 5,
        }
    }
}

/// Dietary preference, mapped onto the classifiers' "Diet Type" categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietaryPreference {
    /// No restriction
    #[default]
    Standard,
    /// Vegetarian
    Vegetarian,
    /// Vegan
    Vegan,
    /// Gluten free
    GlutenFree,
}

impl DietaryPreference {
    /// Case-insensitive lookup; unknown preferences fall back to `Standard`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            "gluten-free" | "gluten free" => Self::GlutenFree,
            _ => Self::Standard,
        }
    }

    /// Category label the classifiers were trained on
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten Free",
        }
    }
}

impl From<String> for DietaryPreference {
    fn from(value: String) -> Self {
        Self::from_str_lossy(&value)
    }
}

impl From<DietaryPreference> for String {
    fn from(value: DietaryPreference) -> Self {
        value.label().to_owned()
    }
}

/// Obesity classification produced by the obesity model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObesityCategory {
    /// "Normal weight"
    NormalWeight,
    /// "Obese"
    Obese,
    /// "Overweight"
    Overweight,
    /// "Underweight"
    Underweight,
}

impl ObesityCategory {
    /// Every category, in indicator-column order
    pub const ALL: [Self; 4] = [
        Self::NormalWeight,
        Self::Obese,
        Self::Overweight,
        Self::Underweight,
    ];

    /// Parse a model label; unknown labels yield `None`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "normal weight" | "normalweight" => Some(Self::NormalWeight),
            "obese" => Some(Self::Obese),
            "overweight" => Some(Self::Overweight),
            "underweight" => Some(Self::Underweight),
            _ => None,
        }
    }

    /// Label as emitted by the obesity model
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NormalWeight => "Normal weight",
            Self::Obese => "Obese",
            Self::Overweight => "Overweight",
            Self::Underweight => "Underweight",
        }
    }

    /// One-hot indicator column name in the meal classifiers' schema
    #[must_use]
    pub const fn indicator_column(self) -> &'static str {
        match self {
            Self::NormalWeight => "Normalweight",
            Self::Obese => "Obese",
            Self::Overweight => "Overweight",
            Self::Underweight => "Underweight",
        }
    }
}
