// ABOUTME: Daily calorie budget derivation using the Mifflin-St Jeor equation
// ABOUTME: BMI, age, BMR, activity multiplier, and compounding lifestyle adjustments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Calculator Module
//!
//! Turns raw biometrics into a daily calorie target. Every function is pure: the
//! same inputs always produce the same output.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., et al. (2010). *Exercise Physiology*, activity factors 1.2 to 1.9.

use crate::config::calorie::{ActivityFactorsConfig, BmrConfig, CalorieConfig};
use chrono::{Datelike, NaiveDate};
use mealplan_core::errors::{AppError, AppResult};
use mealplan_core::models::{BiometricProfile, CalorieBudget, Gender};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inputs of the daily calorie pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieParams {
    /// Body mass index the effective weight is re-derived from
    pub bmi: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in whole years
    pub age: u32,
    /// Gender; only male and female are accepted
    pub gender: Gender,
    /// Activity level in 1..=5
    pub activity_level: u8,
    /// Whether the user smokes
    pub smoking: bool,
    /// Average nightly sleep in hours
    pub sleep_hours: f64,
    /// Average daily water intake in liters
    pub water_liters: f64,
}

impl CalorieParams {
    /// Collect pipeline inputs from a biometric snapshot
    #[must_use]
    pub const fn from_biometrics(
        biometrics: &BiometricProfile,
        bmi: f64,
        age: u32,
        gender: Gender,
    ) -> Self {
        Self {
            bmi,
            height_cm: biometrics.height_cm,
            age,
            gender,
            activity_level: biometrics.activity_level,
            smoking: biometrics.smoking,
            sleep_hours: biometrics.sleep_hours,
            water_liters: biometrics.water_liters,
        }
    }
}

/// Calculate Body Mass Index
///
/// Formula: BMI = `weight_kg` / (`height_cm` / 100)^2
///
/// The result is unrounded, which is what the classifiers consume. Use
/// [`round_bmi`] for the stored and displayed value.
///
/// # Errors
///
/// Returns an invalid-input error if weight or height is not positive
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> AppResult<f64> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(AppError::out_of_range("Weight must be a positive number of kg"));
    }
    if !(height_cm.is_finite() && height_cm > 0.0) {
        return Err(AppError::out_of_range("Height must be a positive number of cm"));
    }

    let height_m = height_cm / 100.0;
    Ok(weight_kg / height_m.powi(2))
}

/// Round a BMI to two decimals, ties to even
#[must_use]
pub fn round_bmi(bmi: f64) -> f64 {
    (bmi * 100.0).round_ties_even() / 100.0
}

/// Whole years elapsed between `birthdate` and `today`
///
/// # Errors
///
/// Returns an invalid-input error if the birthdate lies in the future
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> AppResult<u32> {
    if birthdate > today {
        return Err(AppError::out_of_range(format!(
            "Birthdate {birthdate} is in the future"
        )));
    }

    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).map_err(|_| AppError::out_of_range("Age must not be negative"))
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// # Errors
///
/// Returns an invalid-input error for any gender other than male or female
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> AppResult<f64> {
    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
        Gender::Other => {
            return Err(AppError::invalid_input(
                "Gender must be 'male' or 'female' for the BMR calculation",
            ))
        }
    };

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    Ok(weight_component + height_component + age_component + gender_constant)
}

/// Look up the activity multiplier for a level
///
/// # Errors
///
/// Returns an invalid-input error for levels outside 1..=5
pub fn activity_multiplier(level: u8, config: &ActivityFactorsConfig) -> AppResult<f64> {
    config.multiplier(level)
}

/// Calculate the daily calorie target
///
/// Pipeline, each step applied to the running total:
/// 1. effective weight = `bmi` x `height_m`^2
/// 2. Mifflin-St Jeor BMR
/// 3. x activity multiplier
/// 4. x smoking factor if smoking
/// 5. x sleep factor if sleep >= threshold
/// 6. x hydration factor if water >= threshold
/// 7. round to a whole calorie, ties to even
///
/// Weight is re-derived from BMI rather than taken from the raw measurement, so
/// a budget always follows the BMI it is stored with.
///
/// # Errors
///
/// Returns an invalid-input error for an unsupported gender or activity level
pub fn calculate_daily_calorie_needs(
    params: &CalorieParams,
    config: &CalorieConfig,
) -> AppResult<f64> {
    let height_m = params.height_cm / 100.0;
    let weight_kg = params.bmi * height_m.powi(2);
    debug!(bmi = params.bmi, weight_kg, "Derived effective weight from BMI");

    let bmr = calculate_mifflin_st_jeor(
        weight_kg,
        params.height_cm,
        params.age,
        params.gender,
        &config.bmr,
    )?;
    debug!(bmr, age = params.age, gender = %params.gender, "Computed basal metabolic rate");

    let multiplier = activity_multiplier(params.activity_level, &config.activity_factors)?;
    let mut calories = bmr * multiplier;
    debug!(
        calories,
        activity_level = params.activity_level,
        multiplier,
        "Applied activity multiplier"
    );

    let lifestyle = &config.lifestyle;
    if params.smoking {
        calories *= lifestyle.smoking_factor;
        debug!(calories, "Applied smoking adjustment");
    }
    if params.sleep_hours >= lifestyle.sleep_threshold_hours {
        calories *= lifestyle.sleep_factor;
        debug!(calories, sleep_hours = params.sleep_hours, "Applied sleep adjustment");
    }
    if params.water_liters >= lifestyle.hydration_threshold_liters {
        calories *= lifestyle.hydration_factor;
        debug!(
            calories,
            water_liters = params.water_liters,
            "Applied hydration adjustment"
        );
    }

    let daily_total = calories.round_ties_even();
    debug!(daily_total, "Daily calorie needs");
    Ok(daily_total)
}

/// Derive the stored calorie budget for a biometric snapshot
///
/// BMI is rounded to two decimals first and the daily total is computed from
/// that rounded value.
///
/// # Errors
///
/// Returns an invalid-input error if the biometrics or gender cannot be used
pub fn calculate_calorie_budget(
    biometrics: &BiometricProfile,
    age: u32,
    gender: Gender,
    config: &CalorieConfig,
) -> AppResult<CalorieBudget> {
    let bmi = round_bmi(calculate_bmi(biometrics.weight_kg, biometrics.height_cm)?);
    let params = CalorieParams::from_biometrics(biometrics, bmi, age, gender);
    let daily_total = calculate_daily_calorie_needs(&params, config)?;

    Ok(CalorieBudget { bmi, daily_total })
}
