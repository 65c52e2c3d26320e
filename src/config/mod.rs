// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven server config plus the calorie engine constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the recommendation server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Calorie**: Engine coefficients, multipliers, and slot fractions (re-exported)

/// Environment and server configuration
pub mod environment;

pub use environment::{
    ClassifierConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, ServerConfig,
};
pub use mealplan_intelligence::config::{
    ActivityFactorsConfig, BmrConfig, CalorieConfig, ConfigError, LifestyleAdjustmentsConfig,
    SlotFractionsConfig,
};
