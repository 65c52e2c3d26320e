// ABOUTME: Integration tests for SQLite storage of users and per-day meal suggestions
// ABOUTME: Covers user CRUD, e-mail uniqueness, suggestion keys, invalidation, and file databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Days, NaiveDate, Utc};
use common::{create_test_database, sample_biometrics, test_today};
use mealplan_server::database::{Database, DatabaseProvider};
use mealplan_server::errors::ErrorCode;
use mealplan_server::models::{CalorieBudget, Gender, MealSlot, MealSuggestion, UserProfile};
use tempfile::TempDir;
use uuid::Uuid;

fn user(email: &str) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: Uuid::new_v4(),
        name: "Alan".to_owned(),
        surname: "Turing".to_owned(),
        email: email.to_owned(),
        birthdate: NaiveDate::from_ymd_opt(1994, 3, 1).unwrap(),
        gender: Gender::Male,
        biometrics: sample_biometrics(),
        budget: CalorieBudget {
            bmi: 22.86,
            daily_total: 2500.0,
        },
        obesity_category: None,
        created_at: now,
        updated_at: now,
    }
}

fn suggestion(user_id: Uuid, slot: MealSlot, label: &str) -> MealSuggestion {
    MealSuggestion::new(user_id, slot, test_today(), label.to_owned(), 500.0)
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let db = create_test_database().await.unwrap();
    let profile = user("alan@example.com");

    let id = db.create_user(&profile).await.unwrap();
    assert_eq!(id, profile.id);

    let by_id = db.get_user(id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "alan@example.com");
    assert_eq!(by_id.gender, Gender::Male);
    assert_eq!(by_id.biometrics, profile.biometrics);
    assert_eq!(by_id.budget, profile.budget);
    assert_eq!(by_id.obesity_category, None);

    let by_email = db.get_user_by_email("alan@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, id);

    assert!(db.get_user(Uuid::new_v4()).await.unwrap().is_none());
    assert!(db.get_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_already_exists() {
    let db = create_test_database().await.unwrap();
    db.create_user(&user("dup@example.com")).await.unwrap();

    let error = db.create_user(&user("dup@example.com")).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_save_user_overwrites_mutable_fields() {
    let db = create_test_database().await.unwrap();
    let mut profile = user("update@example.com");
    db.create_user(&profile).await.unwrap();

    profile.biometrics.weight_kg = 80.0;
    profile.budget.daily_total = 2700.0;
    profile.obesity_category = Some("Overweight".to_owned());
    db.save_user(&profile).await.unwrap();

    let stored = db.get_user(profile.id).await.unwrap().unwrap();
    assert!((stored.biometrics.weight_kg - 80.0).abs() < f64::EPSILON);
    assert!((stored.budget.daily_total - 2700.0).abs() < f64::EPSILON);
    assert_eq!(stored.obesity_category.as_deref(), Some("Overweight"));
}

#[tokio::test]
async fn test_save_unknown_user_is_not_found() {
    let db = create_test_database().await.unwrap();
    let error = db.save_user(&user("ghost@example.com")).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_one_suggestion_per_user_slot_and_date() {
    let db = create_test_database().await.unwrap();
    let profile = user("meals@example.com");
    db.create_user(&profile).await.unwrap();

    db.insert_suggestion(&suggestion(profile.id, MealSlot::Lunch, "Salad"))
        .await
        .unwrap();
    let error = db
        .insert_suggestion(&suggestion(profile.id, MealSlot::Lunch, "Soup"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    let stored = db
        .find_suggestion(profile.id, MealSlot::Lunch, test_today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.label, "Salad");

    // Same slot on another day is a separate key
    let tomorrow = test_today().checked_add_days(Days::new(1)).unwrap();
    let next_day = MealSuggestion::new(profile.id, MealSlot::Lunch, tomorrow, "Soup".to_owned(), 500.0);
    db.insert_suggestion(&next_day).await.unwrap();
    assert!(db
        .find_suggestion(profile.id, MealSlot::Dinner, test_today())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_exercise_suggestions_are_not_stored() {
    let db = create_test_database().await.unwrap();
    let profile = user("gym@example.com");
    db.create_user(&profile).await.unwrap();

    let error = db
        .insert_suggestion(&suggestion(profile.id, MealSlot::Exercise, "Running"))
        .await
        .unwrap_err();
    assert!(error.is_invalid_input());
    assert!(db
        .list_suggestions(profile.id, test_today())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_and_list_suggestions() {
    let db = create_test_database().await.unwrap();
    let profile = user("plan@example.com");
    let other = user("other@example.com");
    db.create_user(&profile).await.unwrap();
    db.create_user(&other).await.unwrap();

    for (slot, label) in [
        (MealSlot::Snack, "Nuts"),
        (MealSlot::Breakfast, "Oats"),
        (MealSlot::Dinner, "Fish"),
    ] {
        db.insert_suggestion(&suggestion(profile.id, slot, label))
            .await
            .unwrap();
    }
    db.insert_suggestion(&suggestion(other.id, MealSlot::Lunch, "Rice"))
        .await
        .unwrap();

    let plan = db.list_suggestions(profile.id, test_today()).await.unwrap();
    let slots: Vec<MealSlot> = plan.iter().map(|s| s.slot).collect();
    assert_eq!(
        slots,
        vec![MealSlot::Breakfast, MealSlot::Dinner, MealSlot::Snack]
    );

    assert_eq!(db.delete_suggestions(profile.id, test_today()).await.unwrap(), 3);
    assert_eq!(db.delete_suggestions(profile.id, test_today()).await.unwrap(), 0);
    assert_eq!(db.list_suggestions(other.id, test_today()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("mealplan.db");
    let url = format!("sqlite:{}", path.display());

    let profile = user("disk@example.com");
    {
        let db = Database::new(&url).await.unwrap();
        db.create_user(&profile).await.unwrap();
        db.insert_suggestion(&suggestion(profile.id, MealSlot::Breakfast, "Eggs"))
            .await
            .unwrap();
    }

    let reopened = Database::new(&url).await.unwrap();
    reopened.health_check().await.unwrap();
    let stored = reopened.get_user(profile.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "disk@example.com");
    let plan = reopened.list_suggestions(profile.id, test_today()).await.unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].label, "Eggs");
}
