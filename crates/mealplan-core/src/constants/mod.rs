// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for ports, defaults, units, and model names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Service names for structured logging
pub mod service_names {
    /// The recommendation server
    pub const MEALPLAN_SERVER: &str = "mealplan-server";
}

/// Default configuration values
pub mod defaults {
    /// Default bind address
    pub const HOST: &str = "127.0.0.1";
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/mealplan.db";
    /// Default model-serving endpoint
    pub const CLASSIFIER_BASE_URL: &str = "http://127.0.0.1:8501";
    /// Default classifier request timeout
    pub const CLASSIFIER_TIMEOUT_SECS: u64 = 30;
    /// Default allowed browser origin
    pub const CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000";
}

/// Unit suffixes accepted on request measurements
pub mod units {
    /// Centimeters (height, waist)
    pub const CENTIMETERS: &str = "cm";
    /// Kilograms (weight)
    pub const KILOGRAMS: &str = "kg";
    /// Liters (water intake)
    pub const LITERS: &str = "l";
    /// Hours (sleep)
    pub const HOURS: &str = "h";
}

/// Model names as exposed by the model-serving endpoint
pub mod models {
    /// Obesity category classifier
    pub const OBESITY: &str = "obesity";
}
