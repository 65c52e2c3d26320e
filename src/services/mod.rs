// ABOUTME: Domain service layer for registration, profile updates, and recommendations
// ABOUTME: Keeps business rules out of route handlers so they can be tested without HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers parse requests and format responses; every rule about
//! users, calorie budgets, and cached suggestions lives here.

/// Registration, profile updates, obesity prediction, and per-day meal suggestions
pub mod recommendations;

pub use recommendations::{NewUser, RecommendationService, UserSummary};
