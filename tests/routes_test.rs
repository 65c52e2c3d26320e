// ABOUTME: HTTP-level tests for the assembled router using tower oneshot requests
// ABOUTME: Covers registration, suggestions, profile updates, error bodies, health, and request IDs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::create_test_resources;
use mealplan_server::models::MealSlot;
use mealplan_server::server::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn registration(email: &str) -> Value {
    json!({
        "name": "Alan",
        "surname": "Turing",
        "email": email,
        "birthdate": "1990-01-15",
        "gender": "male",
        "height": "175 cm",
        "weight": "70 kg",
        "waist": "82 cm",
        "activityLevel": 2,
        "sleepDuration": 8,
        "waterIntake": "2.5 l",
        "smoke": false,
        "diabetes": false,
        "hypertension": false,
        "dietPref": "Standard"
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(app, Method::POST, "/api/users", Some(registration(email))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["user_id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_register_returns_budget() {
    let (resources, _classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);

    let (status, body) =
        send(&app, Method::POST, "/api/users", Some(registration("Alan@Example.com"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["email"], "alan@example.com");
    assert_eq!(body["bmi"], 22.86);
    assert!(Uuid::parse_str(body["user_id"].as_str().unwrap()).is_ok());
    assert!(body["daily_calorie_needs"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (resources, _classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);

    let mut body = registration("bad@example.com");
    body["height"] = json!("tall");
    let (status, error) = send(&app, Method::POST, "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "INVALID_FORMAT");

    let mut body = registration("other@example.com");
    body["gender"] = json!("unspecified");
    let (status, error) = send(&app, Method::POST, "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "INVALID_INPUT");

    register(&app, "taken@example.com").await;
    let (status, error) =
        send(&app, Method::POST, "/api/users", Some(registration("taken@example.com"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_missing_measurement_is_missing_field() {
    let (resources, classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);

    for field in ["height", "weight", "waist", "activityLevel", "sleepDuration"] {
        let mut body = registration(&format!("{field}@example.com"));
        body.as_object_mut().unwrap().remove(field);
        let (status, error) = send(&app, Method::POST, "/api/users", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(error["error"]["code"], "MISSING_REQUIRED_FIELD", "{field}");
    }

    let user_id = register(&app, "partial@example.com").await;
    let update = json!({
        "weight": "80 kg",
        "waist": 90,
        "activityLevel": 3,
        "sleepDuration": 7
    });
    let (status, error) =
        send(&app, Method::PUT, &format!("/api/users/{user_id}"), Some(update)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "MISSING_REQUIRED_FIELD");

    let (_, info) = send(&app, Method::GET, &format!("/api/users/{user_id}"), None).await;
    assert_eq!(info["weight"], 70.0);
    assert_eq!(classifiers.total_calls(), 0);
}

#[tokio::test]
async fn test_get_user_info() {
    let (resources, _classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);
    let user_id = register(&app, "info@example.com").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{user_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["height"], 175.0);
    assert_eq!(body["water_intake"], 2.5);
    assert_eq!(body["dietary_preferences"], "Standard");
    assert_eq!(body["obesity_prediction"], Value::Null);
    assert!(body["age"].as_u64().unwrap() >= 30);
}

#[tokio::test]
async fn test_predict_lunch_is_cached() {
    let (resources, classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);
    let user_id = register(&app, "lunch@example.com").await;
    let uri = format!("/api/users/{user_id}/predict-lunch");

    let (status, first) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["lunch_suggestion"], "lunch #1");
    assert!(first["calories"].as_f64().unwrap() > 0.0);
    assert_eq!(first.as_object().unwrap().len(), 2);

    let (_, second) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(second, first);
    assert_eq!(classifiers.calls(MealSlot::Lunch), 1);
}

#[tokio::test]
async fn test_every_slot_has_a_route() {
    let (resources, classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);
    let user_id = register(&app, "slots@example.com").await;

    for slot in MealSlot::ALL {
        let uri = format!("/api/users/{user_id}/predict-{slot}");
        let (status, body) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body[slot.response_key()], format!("{slot} #1"));
    }

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/users/{user_id}/predict-obesity"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["obesity_prediction"], "obesity #1");
    assert_eq!(classifiers.total_calls(), 6);
}

#[tokio::test]
async fn test_update_regenerates_meals() {
    let (resources, classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);
    let user_id = register(&app, "update@example.com").await;
    send(&app, Method::POST, &format!("/api/users/{user_id}/predict-dinner"), None).await;

    let update = json!({
        "height": 175,
        "weight": "80kg",
        "waist": 90,
        "activityLevel": "3",
        "sleepDuration": "7 h",
        "waterIntake": "",
        "smoke": true,
        "dietPref": "vegan"
    });
    let (status, body) =
        send(&app, Method::PUT, &format!("/api/users/{user_id}"), Some(update)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["weight"], 80.0);
    assert_eq!(body["waterIntake"], 0.0);
    assert_eq!(body["dietPref"], "Vegan");
    assert_eq!(body["bmi"], 26.12);
    assert!(body["daily_calorie_needs"].as_f64().unwrap() > 0.0);
    assert_eq!(body["suggestions"]["dinner_suggestion"], "dinner #2");
    assert_eq!(body["suggestions"]["breakfast_suggestion"], "breakfast #1");
    assert_eq!(body["suggestions"].as_object().unwrap().len(), 4);
    assert_eq!(classifiers.calls(MealSlot::Exercise), 0);

    let (status, plan) = send(&app, Method::GET, &format!("/api/users/{user_id}/plan"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["suggestions"].as_array().unwrap().len(), 4);
    assert!((plan["total_calories"].as_f64().unwrap() - body["daily_calorie_needs"].as_f64().unwrap()).abs() < 1e-6);
}

#[tokio::test]
async fn test_unknown_and_malformed_user_ids() {
    let (resources, classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);

    let missing = Uuid::new_v4();
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/users/{missing}/predict-breakfast"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let (status, body) = send(&app, Method::GET, "/api/users/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    assert_eq!(classifiers.total_calls(), 0);
}

#[tokio::test]
async fn test_health_and_ready() {
    let (resources, _classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mealplan_server");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let (resources, _classifiers) = create_test_resources().await.unwrap();
    let app = build_router(&resources);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/{}", Uuid::new_v4()))
                .header("x-request-id", "client-trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "client-trace-42");
}
