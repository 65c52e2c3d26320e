// ABOUTME: Calorie engine configuration with Mifflin-St Jeor coefficients and adjustment factors
// ABOUTME: Activity multipliers, lifestyle adjustments, and per-slot budget fractions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Engine Configuration
//!
//! The defaults are the fixed values the classifiers were trained against. They are
//! carried in a struct so the orchestrator receives them explicitly rather than
//! reaching for module-level constants.

use super::error::ConfigError;
use mealplan_core::errors::AppResult;
use mealplan_core::models::{ActivityLevel, MealSlot};
use serde::{Deserialize, Serialize};

/// Complete calorie engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalorieConfig {
    /// Basal metabolic rate formula coefficients
    pub bmr: BmrConfig,
    /// Activity level multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Smoking, sleep, and hydration adjustments
    pub lifestyle: LifestyleAdjustmentsConfig,
    /// Share of the daily budget assigned to each slot
    pub slot_fractions: SlotFractionsConfig,
}

impl CalorieConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a multiplier is not positive or the four meal
    /// fractions do not sum to 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = &self.activity_factors;
        let all_factors = [
            factors.sedentary,
            factors.lightly_active,
            factors.moderately_active,
            factors.very_active,
            factors.extra_active,
        ];
        if all_factors.iter().any(|factor| *factor <= 0.0) {
            return Err(ConfigError::InvalidRange(
                "activity multipliers must be positive",
            ));
        }

        let lifestyle = &self.lifestyle;
        if lifestyle.smoking_factor <= 0.0
            || lifestyle.sleep_factor <= 0.0
            || lifestyle.hydration_factor <= 0.0
        {
            return Err(ConfigError::InvalidRange(
                "lifestyle adjustment factors must be positive",
            ));
        }

        let fractions = &self.slot_fractions;
        if MealSlot::ALL
            .iter()
            .any(|slot| fractions.fraction(*slot) < 0.0)
        {
            return Err(ConfigError::InvalidRange("slot fractions must not be negative"));
        }
        if (fractions.meal_total() - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidWeights(
                "breakfast, lunch, dinner and snack fractions must sum to 1.0",
            ));
        }

        Ok(())
    }
}

/// Mifflin-St Jeor coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). *American Journal of Clinical Nutrition*, 51(2), 241-247.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for levels 1 through 5
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Level 1, sedentary: 1.2
    pub sedentary: f64,
    /// Level 2, lightly active: 1.375
    pub lightly_active: f64,
    /// Level 3, moderately active: 1.55
    pub moderately_active: f64,
    /// Level 4, very active: 1.725
    pub very_active: f64,
    /// Level 5, extra active: 1.9
    pub extra_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for a numeric activity level
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for levels outside 1..=5
    pub fn multiplier(&self, level: u8) -> AppResult<f64> {
        Ok(match ActivityLevel::from_level(level)? {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        })
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

/// Multiplicative lifestyle adjustments applied after the activity multiplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifestyleAdjustmentsConfig {
    /// Applied when the user smokes
    pub smoking_factor: f64,
    /// Sleep at or above this many hours triggers `sleep_factor`
    pub sleep_threshold_hours: f64,
    /// Applied for sufficient sleep
    pub sleep_factor: f64,
    /// Water intake at or above this many liters triggers `hydration_factor`
    pub hydration_threshold_liters: f64,
    /// Applied for sufficient hydration
    pub hydration_factor: f64,
}

impl Default for LifestyleAdjustmentsConfig {
    fn default() -> Self {
        Self {
            smoking_factor: 0.95,
            sleep_threshold_hours: 7.0,
            sleep_factor: 1.05,
            hydration_threshold_liters: 2.0,
            hydration_factor: 1.05,
        }
    }
}

/// Share of the daily calorie total assigned to each slot
///
/// Breakfast, lunch, dinner, and snack partition the budget. Exercise is an
/// additional target on top of it, not part of the partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotFractionsConfig {
    /// Breakfast share (0.25)
    pub breakfast: f64,
    /// Lunch share (0.35)
    pub lunch: f64,
    /// Dinner share (0.30)
    pub dinner: f64,
    /// Snack share (0.10)
    pub snack: f64,
    /// Exercise target (0.15)
    pub exercise: f64,
}

impl SlotFractionsConfig {
    /// Fraction for one slot
    #[must_use]
    pub const fn fraction(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snack => self.snack,
            MealSlot::Exercise => self.exercise,
        }
    }

    /// Sum of the four meal fractions
    #[must_use]
    pub fn meal_total(&self) -> f64 {
        MealSlot::MEALS.iter().map(|slot| self.fraction(*slot)).sum()
    }
}

impl Default for SlotFractionsConfig {
    fn default() -> Self {
        Self {
            breakfast: 0.25,
            lunch: 0.35,
            dinner: 0.30,
            snack: 0.10,
            exercise: 0.15,
        }
    }
}
