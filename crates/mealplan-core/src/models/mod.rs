// ABOUTME: Core data models for the meal and exercise recommendation backend
// ABOUTME: Re-exports user profiles, biometric categories, meal slots, and measurement parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserProfile`: stored user record with its `BiometricProfile` and derived `CalorieBudget`
//! - `MealSlot` / `MealSuggestion`: the five recommendation categories and one stored answer
//! - `Gender`, `ActivityLevel`, `DietaryPreference`, `ObesityCategory`: categorical inputs
//! - `Measurement`: wire representation of numeric fields with unit suffixes

mod biometrics;
mod meal;
mod measurement;
mod user;

pub use biometrics::{ActivityLevel, DietaryPreference, Gender, ObesityCategory};
pub use meal::{MealSlot, MealSuggestion};
pub use measurement::{parse_with_unit, Measurement};
pub use user::{BiometricProfile, CalorieBudget, UserProfile};
