// ABOUTME: Route module organization for the recommendation server HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers over the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to [`crate::services`].

/// Health check and readiness routes
pub mod health;
/// Per-slot suggestion and obesity prediction routes
pub mod predictions;
/// Registration, profile, and day plan routes
pub mod users;

/// Health check route handlers
pub use health::HealthRoutes;
/// Prediction route handlers
pub use predictions::PredictionRoutes;
/// User route handlers
pub use users::UserRoutes;
