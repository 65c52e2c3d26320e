// ABOUTME: Feature vector assembly and fixed-width encoding for the recommendation classifiers
// ABOUTME: Builds named per-slot and obesity features, then lays them out in each model's column order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feature Assembly Module
//!
//! Assembly and encoding are separate steps. [`assemble_slot_features`] and
//! [`assemble_obesity_features`] produce a named [`FeatureVector`] that still
//! carries categorical values. A [`ModelSchema`] then expands categories into
//! indicator columns and lays everything out in the exact column order the model
//! was trained on. Columns with no matching feature are zero-filled.

use crate::calorie_calculator::{age_on, calculate_bmi};
use crate::config::calorie::CalorieConfig;
use chrono::NaiveDate;
use mealplan_core::constants::models::OBESITY;
use mealplan_core::errors::AppResult;
use mealplan_core::models::{ActivityLevel, DietaryPreference, MealSlot, ObesityCategory, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Feature names shared by assembly and schemas
pub mod names {
    /// Age in years
    pub const AGE: &str = "Age";
    /// Height in centimeters
    pub const HEIGHT: &str = "Height";
    /// Weight in kilograms
    pub const WEIGHT: &str = "Weight";
    /// Unrounded BMI
    pub const BMI: &str = "BMI";
    /// Activity level 1..=5
    pub const ACTIVITY: &str = "PhysicalActivityLevel";
    /// Waist circumference in the meal models
    pub const WAIST: &str = "Waist";
    /// Waist circumference in the obesity model
    pub const WAIST_WIDTH: &str = "Waist_Width";
    /// Diabetes flag
    pub const DIABETES: &str = "Diabetes";
    /// Hypertension flag
    pub const HYPERTENSION: &str = "Hypertension";
    /// Obesity category label
    pub const OBESITY_CATEGORY: &str = "ObesityCategory";
    /// Male indicator in the meal models
    pub const GENDER_MALE: &str = "gender";
    /// Gender category in the obesity model
    pub const GENDER: &str = "Gender";
    /// Dietary preference label
    pub const DIET_TYPE: &str = "Diet Type";
}

/// Value of one named feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Numeric feature passed through as-is
    Number(f64),
    /// Categorical feature expanded into indicator columns by the schema
    Category(String),
    /// Categorical feature with no value; every indicator column is zero
    Missing,
}

impl FeatureValue {
    /// 1.0 for true, 0.0 for false
    #[must_use]
    pub const fn flag(value: bool) -> Self {
        Self::Number(if value { 1.0 } else { 0.0 })
    }
}

/// A named feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    /// Feature name as the classifiers know it
    pub name: &'static str,
    /// Feature value
    pub value: FeatureValue,
}

/// Ordered collection of named features for one classifier call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    features: Vec<Feature>,
}

impl FeatureVector {
    /// Empty vector
    #[must_use]
    pub const fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Append a feature
    pub fn push(&mut self, name: &'static str, value: FeatureValue) {
        self.features.push(Feature { name, value });
    }

    /// Look up a feature by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.features
            .iter()
            .find(|feature| feature.name == name)
            .map(|feature| &feature.value)
    }

    /// Numeric value of a feature, if present and numeric
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(FeatureValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Feature names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(|feature| feature.name)
    }

    /// Number of features
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the vector holds no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Calories assigned to a slot: `daily_total` x slot fraction
#[must_use]
pub fn slot_calories(daily_total: f64, slot: MealSlot, config: &CalorieConfig) -> f64 {
    daily_total * config.slot_fractions.fraction(slot)
}

/// Build the feature vector for one meal or exercise slot
///
/// Produces, in order: Age, Height, Weight, BMI (unrounded), `PhysicalActivityLevel`,
/// `Assigned_<Slot>_Calories`, Waist, Diabetes, Hypertension, `ObesityCategory`,
/// gender (1 = male), Diet Type.
///
/// # Errors
///
/// Returns an invalid-input error if the birthdate, measurements, or activity
/// level cannot be used
pub fn assemble_slot_features(
    profile: &UserProfile,
    daily_total: f64,
    slot: MealSlot,
    today: NaiveDate,
    config: &CalorieConfig,
) -> AppResult<FeatureVector> {
    let biometrics = &profile.biometrics;
    let age = age_on(profile.birthdate, today)?;
    let bmi = calculate_bmi(biometrics.weight_kg, biometrics.height_cm)?;
    let activity = ActivityLevel::from_level(biometrics.activity_level)?;
    let calories = slot_calories(daily_total, slot, config);

    let obesity = profile
        .obesity()
        .map_or(FeatureValue::Missing, |category| {
            FeatureValue::Category(category.label().to_owned())
        });

    let mut features = FeatureVector::new();
    features.push(names::AGE, FeatureValue::Number(f64::from(age)));
    features.push(names::HEIGHT, FeatureValue::Number(biometrics.height_cm));
    features.push(names::WEIGHT, FeatureValue::Number(biometrics.weight_kg));
    features.push(names::BMI, FeatureValue::Number(bmi));
    features.push(names::ACTIVITY, FeatureValue::Number(f64::from(activity.level())));
    features.push(slot.calories_feature(), FeatureValue::Number(calories));
    features.push(names::WAIST, FeatureValue::Number(biometrics.waist_cm));
    features.push(names::DIABETES, FeatureValue::flag(biometrics.diabetes));
    features.push(names::HYPERTENSION, FeatureValue::flag(biometrics.hypertension));
    features.push(names::OBESITY_CATEGORY, obesity);
    features.push(names::GENDER_MALE, FeatureValue::flag(profile.gender.is_male()));
    features.push(
        names::DIET_TYPE,
        FeatureValue::Category(biometrics.dietary_preference.label().to_owned()),
    );

    debug!(
        user_id = %profile.id,
        %slot,
        age,
        bmi,
        calories,
        "Assembled slot features"
    );
    Ok(features)
}

/// Build the feature vector for the obesity classifier
///
/// Produces Gender (categorical), Age, Height, Weight, BMI (unrounded),
/// `PhysicalActivityLevel`, and `Waist_Width`.
///
/// # Errors
///
/// Returns an invalid-input error if the birthdate, measurements, or activity
/// level cannot be used
pub fn assemble_obesity_features(profile: &UserProfile, today: NaiveDate) -> AppResult<FeatureVector> {
    let biometrics = &profile.biometrics;
    let age = age_on(profile.birthdate, today)?;
    let bmi = calculate_bmi(biometrics.weight_kg, biometrics.height_cm)?;
    let activity = ActivityLevel::from_level(biometrics.activity_level)?;

    let mut features = FeatureVector::new();
    features.push(
        names::GENDER,
        FeatureValue::Category(profile.gender.as_str().to_owned()),
    );
    features.push(names::AGE, FeatureValue::Number(f64::from(age)));
    features.push(names::HEIGHT, FeatureValue::Number(biometrics.height_cm));
    features.push(names::WEIGHT, FeatureValue::Number(biometrics.weight_kg));
    features.push(names::BMI, FeatureValue::Number(bmi));
    features.push(names::ACTIVITY, FeatureValue::Number(f64::from(activity.level())));
    features.push(names::WAIST_WIDTH, FeatureValue::Number(biometrics.waist_cm));

    debug!(user_id = %profile.id, age, bmi, "Assembled obesity features");
    Ok(features)
}

/// Where a model column takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// Copy a numeric feature
    Numeric(&'static str),
    /// 1.0 when the categorical feature equals `category`, else 0.0
    Indicator {
        /// Categorical feature name
        feature: &'static str,
        /// Category this column represents
        category: &'static str,
    },
}

/// One column of a model's input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column header the model was trained with
    pub name: &'static str,
    /// Value source
    pub source: ColumnSource,
}

impl Column {
    const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            source: ColumnSource::Numeric(name),
        }
    }

    const fn indicator(name: &'static str, feature: &'static str, category: &'static str) -> Self {
        Self {
            name,
            source: ColumnSource::Indicator { feature, category },
        }
    }
}

/// Fixed column layout of one classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    /// Model name at the serving endpoint
    pub model: &'static str,
    /// Columns in trained order
    pub columns: Vec<Column>,
}

impl ModelSchema {
    /// Layout shared by the five slot classifiers
    ///
    /// Age, Height, Weight, BMI, `PhysicalActivityLevel`, `Assigned_<Slot>_Calories`,
    /// Waist, Diabetes, Hypertension, four obesity indicators, four diet
    /// indicators, gender.
    #[must_use]
    pub fn meal(slot: MealSlot) -> Self {
        let mut columns = vec![
            Column::numeric(names::AGE),
            Column::numeric(names::HEIGHT),
            Column::numeric(names::WEIGHT),
            Column::numeric(names::BMI),
            Column::numeric(names::ACTIVITY),
            Column::numeric(slot.calories_feature()),
            Column::numeric(names::WAIST),
            Column::numeric(names::DIABETES),
            Column::numeric(names::HYPERTENSION),
        ];
        columns.extend(ObesityCategory::ALL.iter().map(|category| {
            Column::indicator(
                category.indicator_column(),
                names::OBESITY_CATEGORY,
                category.label(),
            )
        }));
        columns.extend(
            [
                DietaryPreference::GlutenFree,
                DietaryPreference::Standard,
                DietaryPreference::Vegan,
                DietaryPreference::Vegetarian,
            ]
            .iter()
            .map(|diet| Column::indicator(diet.label(), names::DIET_TYPE, diet.label())),
        );
        columns.push(Column::numeric(names::GENDER_MALE));

        Self {
            model: slot.as_str(),
            columns,
        }
    }

    /// Layout of the obesity classifier
    #[must_use]
    pub fn obesity() -> Self {
        Self {
            model: OBESITY,
            columns: vec![
                Column::indicator("Female", names::GENDER, "female"),
                Column::indicator("Male", names::GENDER, "male"),
                Column::numeric(names::AGE),
                Column::numeric(names::HEIGHT),
                Column::numeric(names::WEIGHT),
                Column::numeric(names::BMI),
                Column::numeric(names::ACTIVITY),
                Column::numeric(names::WAIST_WIDTH),
            ],
        }
    }

    /// Column headers in order
    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Lay out `features` in this schema's column order
    ///
    /// Numeric columns without a numeric feature and indicator columns whose
    /// category does not match are zero-filled.
    #[must_use]
    pub fn encode(&self, features: &FeatureVector) -> ModelInput {
        let values = self
            .columns
            .iter()
            .map(|column| match &column.source {
                ColumnSource::Numeric(feature) => features.number(feature).unwrap_or(0.0),
                ColumnSource::Indicator { feature, category } => match features.get(feature) {
                    Some(FeatureValue::Category(value)) if same_category(value, category) => 1.0,
                    _ => 0.0,
                },
            })
            .collect();

        ModelInput {
            model: self.model.to_owned(),
            columns: self.column_names().into_iter().map(str::to_owned).collect(),
            values,
        }
    }
}

// "Normal weight" and "Normalweight" name the same category
fn same_category(value: &str, category: &str) -> bool {
    let normalize = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    };
    normalize(value) == normalize(category)
}

/// Fixed-width numeric row sent to a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Model name at the serving endpoint
    pub model: String,
    /// Column headers in trained order
    pub columns: Vec<String>,
    /// One value per column
    pub values: Vec<f64>,
}

impl ModelInput {
    /// Value of a named column
    #[must_use]
    pub fn value(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.values.get(index).copied())
    }
}
