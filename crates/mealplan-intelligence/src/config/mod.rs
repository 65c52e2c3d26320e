// ABOUTME: Configuration module for mealplan-intelligence crate
// ABOUTME: Re-exports calorie engine configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Calorie engine constants (BMR coefficients, multipliers, slot fractions)
pub mod calorie;
/// Configuration validation errors
pub mod error;

pub use calorie::{
    ActivityFactorsConfig, BmrConfig, CalorieConfig, LifestyleAdjustmentsConfig,
    SlotFractionsConfig,
};
pub use error::ConfigError;
