// ABOUTME: Classifier seam between the recommendation service and the trained models
// ABOUTME: Classifier trait plus ClassifierSet holding one model per slot and the obesity model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Classifiers
//!
//! Models are opaque: they receive a fixed-width [`ModelInput`] and answer
//! with a label. The recommendation service receives a [`ClassifierSet`] at
//! construction and never loads models itself, so tests substitute doubles.

mod http;

pub use self::http::HttpClassifier;

use crate::constants::models::OBESITY;
use crate::errors::{AppError, AppResult, PredictionError};
use crate::models::MealSlot;
use async_trait::async_trait;
use mealplan_intelligence::features::{ModelInput, ModelSchema};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Connection timeout for the model-serving endpoint
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A trained model answering one input row with one label
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Model name, used in logs and errors
    fn name(&self) -> &str;

    /// Predict a label for `input`
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`] when the model cannot produce a label
    async fn predict(&self, input: &ModelInput) -> Result<String, PredictionError>;
}

/// The six classifiers the service depends on
#[derive(Clone)]
pub struct ClassifierSet {
    slots: [Arc<dyn Classifier>; 5],
    obesity: Arc<dyn Classifier>,
}

impl ClassifierSet {
    /// Start assembling a set
    #[must_use]
    pub fn builder() -> ClassifierSetBuilder {
        ClassifierSetBuilder::default()
    }

    /// Wire every model to the HTTP serving endpoint at `base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn from_http(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to create HTTP client: {e}")))?;

        let builder = MealSlot::ALL
            .iter()
            .fold(Self::builder(), |builder, &slot| {
                builder.slot(
                    slot,
                    Arc::new(HttpClassifier::new(
                        client.clone(),
                        base_url,
                        ModelSchema::meal(slot),
                    )),
                )
            })
            .obesity(Arc::new(HttpClassifier::new(
                client,
                base_url,
                ModelSchema::obesity(),
            )));

        info!(base_url, timeout_secs = timeout.as_secs(), "HTTP classifiers configured");
        builder.build()
    }

    /// Classifier for a recommendation slot
    #[must_use]
    pub fn for_slot(&self, slot: MealSlot) -> &dyn Classifier {
        self.slots[slot_index(slot)].as_ref()
    }

    /// Obesity category classifier
    #[must_use]
    pub fn obesity(&self) -> &dyn Classifier {
        self.obesity.as_ref()
    }
}

impl fmt::Debug for ClassifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierSet")
            .field(
                "slots",
                &self.slots.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("obesity", &self.obesity.name())
            .finish()
    }
}

/// Builder for [`ClassifierSet`]
#[derive(Default)]
pub struct ClassifierSetBuilder {
    slots: [Option<Arc<dyn Classifier>>; 5],
    obesity: Option<Arc<dyn Classifier>>,
}

impl ClassifierSetBuilder {
    /// Set the classifier for `slot`
    #[must_use]
    pub fn slot(mut self, slot: MealSlot, classifier: Arc<dyn Classifier>) -> Self {
        self.slots[slot_index(slot)] = Some(classifier);
        self
    }

    /// Set the obesity classifier
    #[must_use]
    pub fn obesity(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.obesity = Some(classifier);
        self
    }

    /// Finish the set
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first slot without a classifier
    pub fn build(self) -> AppResult<ClassifierSet> {
        let [breakfast, lunch, dinner, snack, exercise] = self.slots;
        let require = |classifier: Option<Arc<dyn Classifier>>, slot: MealSlot| {
            classifier.ok_or_else(|| {
                AppError::config(format!("No classifier configured for slot '{slot}'"))
            })
        };

        Ok(ClassifierSet {
            slots: [
                require(breakfast, MealSlot::Breakfast)?,
                require(lunch, MealSlot::Lunch)?,
                require(dinner, MealSlot::Dinner)?,
                require(snack, MealSlot::Snack)?,
                require(exercise, MealSlot::Exercise)?,
            ],
            obesity: self.obesity.ok_or_else(|| {
                AppError::config(format!("No classifier configured for model '{OBESITY}'"))
            })?,
        })
    }
}

const fn slot_index(slot: MealSlot) -> usize {
    match slot {
        MealSlot::Breakfast => 0,
        MealSlot::Lunch => 1,
        MealSlot::Dinner => 2,
        MealSlot::Snack => 3,
        MealSlot::Exercise => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl Classifier for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        async fn predict(&self, _input: &ModelInput) -> Result<String, PredictionError> {
            Ok(self.0.to_owned())
        }
    }

    #[test]
    fn test_build_requires_every_slot() {
        let error = ClassifierSet::builder()
            .slot(MealSlot::Breakfast, Arc::new(Fixed("breakfast")))
            .obesity(Arc::new(Fixed("obesity")))
            .build()
            .unwrap_err();
        assert!(error.message.contains("lunch"));
    }

    #[test]
    fn test_slots_are_routed_to_their_classifier() {
        let set = MealSlot::ALL
            .iter()
            .fold(ClassifierSet::builder(), |builder, &slot| {
                builder.slot(slot, Arc::new(Fixed(slot.as_str())))
            })
            .obesity(Arc::new(Fixed("obesity")))
            .build()
            .unwrap();

        for slot in MealSlot::ALL {
            assert_eq!(set.for_slot(slot).name(), slot.as_str());
        }
        assert_eq!(set.obesity().name(), "obesity");
    }
}
