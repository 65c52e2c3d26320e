// ABOUTME: Re-exports application constants from mealplan-core
// ABOUTME: Ports, configuration defaults, measurement units, and model names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealplan_core::constants::*;
