// ABOUTME: Parsing of request measurements that may carry embedded unit suffixes
// ABOUTME: Accepts JSON numbers or strings like "175 cm" and yields plain numeric values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A biometric field as received over the wire
///
/// Clients send either bare numbers (`70.5`) or strings with a unit suffix
/// (`"70.5 kg"`). The unit is stripped before numeric conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    /// Bare JSON number
    Number(f64),
    /// String, possibly with a unit suffix
    Text(String),
}

impl Measurement {
    /// Numeric value with `unit` stripped
    ///
    /// # Errors
    ///
    /// Returns an invalid-format error when the text is not a number, or a
    /// missing-field error when it is empty
    pub fn value(&self, field: &str, unit: &str) -> AppResult<f64> {
        match self {
            Self::Number(value) => finite(*value, field),
            Self::Text(raw) => parse_with_unit(raw, unit, field),
        }
    }

    /// Like [`Self::value`], but an empty string yields `default`
    ///
    /// # Errors
    ///
    /// Returns an invalid-format error when non-empty text is not a number
    pub fn value_or(&self, field: &str, unit: &str, default: f64) -> AppResult<f64> {
        match self {
            Self::Text(raw) if raw.trim().is_empty() => Ok(default),
            other => other.value(field, unit),
        }
    }

    /// Integral value, used for levels supplied as `2` or `"2"`
    ///
    /// # Errors
    ///
    /// Returns an invalid-format error when the value is not a whole number in 0..=255
    pub fn level(&self, field: &str) -> AppResult<u8> {
        let value = self.value(field, "")?;
        if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
            return Err(AppError::invalid_format(
                field,
                format!("expected a whole number, got {value}"),
            ));
        }
        Ok(value as u8)
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Measurement {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Strip a trailing unit (case-insensitive, optional whitespace) and parse the number
///
/// # Errors
///
/// Returns a missing-field error for empty input and an invalid-format error
/// when the remainder is not a finite number
pub fn parse_with_unit(raw: &str, unit: &str, field: &str) -> AppResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(field));
    }

    let number = if unit.is_empty() {
        trimmed
    } else {
        strip_suffix_ignore_case(trimmed, unit).map_or(trimmed, str::trim_end)
    };

    let value = number.parse::<f64>().map_err(|_| {
        AppError::invalid_format(field, format!("'{raw}' is not a number of {unit}"))
    })?;
    finite(value, field)
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

fn finite(value: f64, field: &str) -> AppResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::invalid_format(field, "value must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_suffix_is_stripped() {
        assert!((parse_with_unit("175 cm", "cm", "height").unwrap() - 175.0).abs() < f64::EPSILON);
        assert!((parse_with_unit("70.5kg", "kg", "weight").unwrap() - 70.5).abs() < f64::EPSILON);
        assert!((parse_with_unit(" 82 CM ", "cm", "waist").unwrap() - 82.0).abs() < f64::EPSILON);
        assert!((parse_with_unit("64", "kg", "weight").unwrap() - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_measurements_are_invalid_input() {
        assert!(parse_with_unit("tall", "cm", "height")
            .unwrap_err()
            .is_invalid_input());
        assert!(parse_with_unit("", "cm", "height")
            .unwrap_err()
            .is_invalid_input());
        assert!(parse_with_unit("70 lbs", "kg", "weight")
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_measurement_deserializes_numbers_and_strings() {
        let number: Measurement = serde_json::from_str("70").unwrap();
        let text: Measurement = serde_json::from_str("\"70 kg\"").unwrap();
        assert!((number.value("weight", "kg").unwrap() - 70.0).abs() < f64::EPSILON);
        assert!((text.value("weight", "kg").unwrap() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text_uses_default() {
        let empty = Measurement::from("");
        assert!(empty.value_or("waterIntake", "l", 0.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_levels_must_be_whole_numbers() {
        assert_eq!(Measurement::from("3").level("activityLevel").unwrap(), 3);
        assert_eq!(Measurement::from(2.0).level("activityLevel").unwrap(), 2);
        assert!(Measurement::from(2.5)
            .level("activityLevel")
            .unwrap_err()
            .is_invalid_input());
    }
}
