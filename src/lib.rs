// ABOUTME: Main library entry point for the meal and exercise recommendation server
// ABOUTME: Wires the calorie engine, classifiers, storage, and HTTP API into one service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealplan Server
//!
//! Backend for a diet and health tracking application. Users register with
//! biometric data; the server derives BMI and a daily calorie target, and
//! serves per-meal food and exercise suggestions produced by trained
//! classifiers.
//!
//! ## Architecture
//!
//! - **`mealplan_intelligence`**: the pure calorie and feature engine
//! - **services**: the recommendation orchestrator with per-day caching
//! - **classifiers**: the seam to the trained models
//! - **database**: `SQLite` storage for users and suggestions
//! - **routes**/**server**: the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealplan_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Mealplan server configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────

/// Classifier trait, classifier set, and the HTTP model adapter
pub mod classifiers;

/// Configuration management from environment variables
pub mod config;

/// Application constants re-exported from `mealplan-core`
pub mod constants;

/// `SQLite` storage for users and meal suggestions
pub mod database;

/// Unified error handling re-exported from `mealplan-core`
pub mod errors;

/// Logging configuration and structured logging setup
pub mod logging;

/// HTTP middleware for request IDs and CORS
pub mod middleware;

/// Domain models re-exported from `mealplan-core`
pub mod models;

/// Shared resources handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Business logic for registration, updates, and recommendations
pub mod services;
