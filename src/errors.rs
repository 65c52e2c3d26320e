// ABOUTME: Re-exports error types from mealplan-core for unified type identity
// ABOUTME: Ensures AppError/ErrorCode/PredictionError are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealplan_core::errors::*;
