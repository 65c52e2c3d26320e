// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, scripted classifier doubles, and sample users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `mealplan_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mealplan_intelligence::features::ModelInput;
use mealplan_server::{
    classifiers::{Classifier, ClassifierSet},
    config::ServerConfig,
    database::{Database, DatabaseProvider},
    errors::PredictionError,
    models::{BiometricProfile, DietaryPreference, Gender, MealSlot},
    resources::ServerResources,
    services::{NewUser, RecommendationService},
};
use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Classifier double answering `"<name> #<n>"` where `n` counts its calls
pub struct ScriptedClassifier {
    name: String,
    fail: bool,
    calls: AtomicUsize,
    last_input: Mutex<Option<ModelInput>>,
}

impl ScriptedClassifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<ModelInput> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, input: &ModelInput) -> Result<String, PredictionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_input.lock().unwrap() = Some(input.clone());
        if self.fail {
            return Err(PredictionError::transport(&self.name, "connection refused"));
        }
        Ok(format!("{} #{call}", self.name))
    }
}

/// A classifier set whose doubles stay inspectable
pub struct TestClassifiers {
    pub set: ClassifierSet,
    pub slots: HashMap<MealSlot, Arc<ScriptedClassifier>>,
    pub obesity: Arc<ScriptedClassifier>,
}

impl TestClassifiers {
    pub fn calls(&self, slot: MealSlot) -> usize {
        self.slots[&slot].calls()
    }

    pub fn total_calls(&self) -> usize {
        self.slots.values().map(|c| c.calls()).sum::<usize>() + self.obesity.calls()
    }
}

/// Doubles for every slot; `failing` slots return a transport error
pub fn scripted_classifiers(failing: &[MealSlot]) -> TestClassifiers {
    let slots: HashMap<MealSlot, Arc<ScriptedClassifier>> = MealSlot::ALL
        .iter()
        .map(|&slot| {
            let classifier = if failing.contains(&slot) {
                ScriptedClassifier::failing(slot.as_str())
            } else {
                ScriptedClassifier::new(slot.as_str())
            };
            (slot, Arc::new(classifier))
        })
        .collect();
    let obesity = Arc::new(ScriptedClassifier::new("obesity"));

    let set = slots
        .iter()
        .fold(ClassifierSet::builder(), |builder, (&slot, classifier)| {
            builder.slot(slot, Arc::clone(classifier) as Arc<dyn Classifier>)
        })
        .obesity(Arc::clone(&obesity) as Arc<dyn Classifier>)
        .build()
        .unwrap();

    TestClassifiers {
        set,
        slots,
        obesity,
    }
}

/// Recommendation service over an in-memory database and scripted classifiers
pub async fn create_test_service(
    failing: &[MealSlot],
) -> Result<(RecommendationService, Arc<Database>, TestClassifiers)> {
    let database = create_test_database().await?;
    let classifiers = scripted_classifiers(failing);
    let service = RecommendationService::new(
        Arc::clone(&database) as Arc<dyn DatabaseProvider>,
        classifiers.set.clone(),
        ServerConfig::default().calorie,
    );
    Ok((service, database, classifiers))
}

/// Server resources for route tests
pub async fn create_test_resources() -> Result<(Arc<ServerResources>, TestClassifiers)> {
    let database = create_test_database().await?;
    let classifiers = scripted_classifiers(&[]);
    let resources = ServerResources::new(
        ServerConfig::default(),
        database as Arc<dyn DatabaseProvider>,
        classifiers.set.clone(),
    );
    Ok((Arc::new(resources), classifiers))
}

/// Fixed request date used across tests
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Male, 30 on `test_today()`, 175 cm / 70 kg, activity 2, sleep 8 h, water 2.5 l
pub fn sample_new_user(email: &str) -> NewUser {
    NewUser {
        name: "Alan".to_owned(),
        surname: "Turing".to_owned(),
        email: email.to_owned(),
        birthdate: NaiveDate::from_ymd_opt(1994, 3, 1).unwrap(),
        gender: Gender::Male,
        biometrics: sample_biometrics(),
    }
}

pub fn sample_biometrics() -> BiometricProfile {
    BiometricProfile {
        height_cm: 175.0,
        weight_kg: 70.0,
        waist_cm: 82.0,
        activity_level: 2,
        smoking: false,
        sleep_hours: 8.0,
        water_liters: 2.5,
        diabetes: false,
        hypertension: false,
        dietary_preference: DietaryPreference::Standard,
    }
}
