// ABOUTME: Configuration error types for calorie engine validation
// ABOUTME: Defines error variants for invalid ranges and meal fraction sums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for calorie engine validation.

use mealplan_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., a multiplier that is not positive)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Meal fractions don't sum to the whole budget
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
