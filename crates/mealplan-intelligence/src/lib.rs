// ABOUTME: Calorie and feature engine for the meal and exercise recommendation backend
// ABOUTME: Pure functions for BMI, daily calorie needs, and classifier feature vectors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealplan Intelligence
//!
//! The calorie and feature engine. Nothing here performs I/O: every function
//! maps a user snapshot to derived numbers or classifier inputs.
//!
//! ## Modules
//!
//! - **config**: `CalorieConfig` with formula coefficients, multipliers, and slot fractions
//! - **`calorie_calculator`**: BMI, age, Mifflin-St Jeor BMR, and the daily calorie pipeline
//! - **features**: per-slot and obesity feature vectors plus fixed-width model encoding

/// Calorie engine configuration and validation
pub mod config;

/// BMI, BMR, and daily calorie needs
pub mod calorie_calculator;

/// Classifier feature assembly and encoding
pub mod features;

pub use calorie_calculator::{
    activity_multiplier, age_on, calculate_bmi, calculate_calorie_budget,
    calculate_daily_calorie_needs, calculate_mifflin_st_jeor, round_bmi, CalorieParams,
};
pub use config::{CalorieConfig, ConfigError};
pub use features::{
    assemble_obesity_features, assemble_slot_features, slot_calories, FeatureValue,
    FeatureVector, ModelInput, ModelSchema,
};
