// ABOUTME: Core types and constants for the meal and exercise recommendation backend
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealplan Core
//!
//! Foundation crate providing shared types and constants for the recommendation
//! backend. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `PredictionError`
//! - **models**: User profiles, biometric categories, meal slots, and suggestions
//! - **constants**: Application-wide constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models (`UserProfile`, `MealSlot`, `MealSuggestion`, etc.)
pub mod models;

/// Application constants organized by domain
pub mod constants;
