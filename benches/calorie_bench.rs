// ABOUTME: Criterion benchmarks for the calorie engine and classifier feature encoding
// ABOUTME: Measures budget derivation, slot feature assembly, and fixed-width encoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the calorie engine.
//!
//! Every suggestion request assembles and encodes a feature vector, and every
//! registration or profile update derives a calorie budget.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mealplan_intelligence::{
    assemble_slot_features, calculate_calorie_budget, CalorieConfig, ModelSchema,
};
use mealplan_server::models::{BiometricProfile, DietaryPreference, Gender, MealSlot, UserProfile};
use uuid::Uuid;

fn biometrics(index: u32) -> BiometricProfile {
    BiometricProfile {
        height_cm: 150.0 + f64::from(index % 50),
        weight_kg: 50.0 + f64::from(index % 60),
        waist_cm: 65.0 + f64::from(index % 40),
        activity_level: u8::try_from(index % 5 + 1).unwrap(),
        smoking: index % 7 == 0,
        sleep_hours: 5.0 + f64::from(index % 5),
        water_liters: 1.0 + f64::from(index % 3),
        diabetes: index % 11 == 0,
        hypertension: index % 13 == 0,
        dietary_preference: DietaryPreference::Standard,
    }
}

fn profile(config: &CalorieConfig) -> UserProfile {
    let biometrics = biometrics(17);
    let budget = calculate_calorie_budget(&biometrics, 34, Gender::Female, config).unwrap();
    UserProfile {
        id: Uuid::new_v4(),
        name: "Bench".to_owned(),
        surname: "User".to_owned(),
        email: "bench@example.com".to_owned(),
        birthdate: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
        gender: Gender::Female,
        biometrics,
        budget,
        obesity_category: Some("Overweight".to_owned()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn bench_calorie_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("calorie_budget");
    let config = CalorieConfig::default();

    group.bench_function("single_budget", |b| {
        let biometrics = biometrics(3);
        b.iter(|| {
            calculate_calorie_budget(black_box(&biometrics), 30, Gender::Male, &config).unwrap()
        });
    });

    for size in [10_u32, 100, 1000] {
        let batch: Vec<BiometricProfile> = (0..size).map(biometrics).collect();
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("batch", size), &batch, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .map(|item| {
                        calculate_calorie_budget(item, 30, Gender::Male, &config)
                            .unwrap()
                            .daily_total
                    })
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

fn bench_feature_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_encoding");
    let config = CalorieConfig::default();
    let user = profile(&config);
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    for slot in MealSlot::ALL {
        let schema = ModelSchema::meal(slot);
        group.bench_function(BenchmarkId::new("assemble_and_encode", slot), |b| {
            b.iter(|| {
                let features = assemble_slot_features(
                    black_box(&user),
                    user.budget.daily_total,
                    slot,
                    today,
                    &config,
                )
                .unwrap();
                schema.encode(&features)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calorie_budget, bench_feature_encoding);
criterion_main!(benches);
