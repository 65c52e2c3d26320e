// ABOUTME: Core data models re-exported from mealplan-core
// ABOUTME: Re-exports UserProfile, MealSlot, MealSuggestion and the biometric categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserProfile`: stored user with biometrics and derived calorie budget
//! - `MealSuggestion`: one classifier answer for a (user, slot, date)
//! - `Measurement`: request value that may carry a unit suffix

pub use mealplan_core::models::*;
