// ABOUTME: Meal slot and meal suggestion models for daily recommendations
// ABOUTME: MealSlot enumerates the five recommendation categories, MealSuggestion is one stored answer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Recommendation category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Exercise session (not a meal, never cached)
    Exercise,
}

impl MealSlot {
    /// Every slot, in display order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Snack,
        Self::Exercise,
    ];

    /// The four meal slots that partition the daily budget and are cached per day
    pub const MEALS: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Lowercase identifier used in routes, storage, and model names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Exercise => "exercise",
        }
    }

    /// Whether suggestions for this slot are persisted and reused for the day
    #[must_use]
    pub const fn is_cached(self) -> bool {
        !matches!(self, Self::Exercise)
    }

    /// Name of the assigned-calories feature the slot's classifier was trained on
    #[must_use]
    pub const fn calories_feature(self) -> &'static str {
        match self {
            Self::Breakfast => "Assigned_Breakfast_Calories",
            Self::Lunch => "Assigned_Lunch_Calories",
            Self::Dinner => "Assigned_Dinner_Calories",
            Self::Snack => "Assigned_Snack_Calories",
            Self::Exercise => "Assigned_Exercise_Calories",
        }
    }

    /// JSON key carrying the label in HTTP responses
    #[must_use]
    pub const fn response_key(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast_suggestion",
            Self::Lunch => "lunch_suggestion",
            Self::Dinner => "dinner_suggestion",
            Self::Snack => "snack_suggestion",
            Self::Exercise => "exercise_suggestion",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            "exercise" => Ok(Self::Exercise),
            other => Err(AppError::invalid_input(format!(
                "Unknown meal slot '{other}'"
            ))),
        }
    }
}

/// A classifier answer for one (user, slot, date)
///
/// At most one stored row exists per (user, slot, date). Exercise suggestions are
/// computed on every request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSuggestion {
    /// Owner of the suggestion
    pub user_id: Uuid,
    /// Recommendation category
    pub slot: MealSlot,
    /// Calendar day the suggestion belongs to
    pub date: NaiveDate,
    /// Label produced by the slot's classifier
    pub label: String,
    /// Calories assigned to the slot from the daily budget
    pub calories: f64,
    /// When the suggestion was produced
    pub created_at: DateTime<Utc>,
}

impl MealSuggestion {
    /// Create a suggestion stamped with the current time
    #[must_use]
    pub fn new(user_id: Uuid, slot: MealSlot, date: NaiveDate, label: String, calories: f64) -> Self {
        Self {
            user_id,
            slot,
            date,
            label,
            calories,
            created_at: Utc::now(),
        }
    }
}
