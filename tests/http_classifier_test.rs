// ABOUTME: Tests the HTTP classifier adapter against a local axum model-serving stub
// ABOUTME: Covers label shapes, request layout, error statuses, empty labels, and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use common::init_test_logging;
use mealplan_intelligence::features::{FeatureVector, ModelSchema};
use mealplan_server::classifiers::ClassifierSet;
use mealplan_server::errors::PredictionError;
use mealplan_server::models::MealSlot;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// Stub model server: each model name exercises one response shape
async fn predict(Path(model): Path<String>, Json(body): Json<Value>) -> Response {
    let width = body["columns"].as_array().map_or(0, Vec::len);
    let row = body["data"][0].as_array().map_or(0, Vec::len);

    match model.as_str() {
        "breakfast" => Json(json!({ "prediction": format!("{width}x{row}") })).into_response(),
        "lunch" => Json(json!({ "prediction": ["Lentil soup"] })).into_response(),
        "dinner" => (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response(),
        "snack" => Json(json!({ "prediction": "   " })).into_response(),
        "exercise" => {
            sleep(Duration::from_secs(3)).await;
            Json(json!({ "prediction": "Too late" })).into_response()
        }
        "obesity" => Json(json!({ "prediction": "Normal weight" })).into_response(),
        _ => (StatusCode::NOT_FOUND, "unknown model").into_response(),
    }
}

async fn spawn_model_server() -> String {
    init_test_logging();
    let app = Router::new().route("/models/:model/predict", post(predict));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}/")
}

async fn classifiers() -> ClassifierSet {
    let base_url = spawn_model_server().await;
    ClassifierSet::from_http(&base_url, Duration::from_secs(1)).unwrap()
}

async fn predict_slot(set: &ClassifierSet, slot: MealSlot) -> Result<String, PredictionError> {
    let input = ModelSchema::meal(slot).encode(&FeatureVector::new());
    set.for_slot(slot).predict(&input).await
}

#[tokio::test]
async fn test_sends_one_full_width_row() {
    let set = classifiers().await;
    assert_eq!(predict_slot(&set, MealSlot::Breakfast).await.unwrap(), "18x18");
}

#[tokio::test]
async fn test_accepts_batch_prediction() {
    let set = classifiers().await;
    assert_eq!(predict_slot(&set, MealSlot::Lunch).await.unwrap(), "Lentil soup");
}

#[tokio::test]
async fn test_obesity_model() {
    let set = classifiers().await;
    let input = ModelSchema::obesity().encode(&FeatureVector::new());
    assert_eq!(set.obesity().predict(&input).await.unwrap(), "Normal weight");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let set = classifiers().await;
    let error = predict_slot(&set, MealSlot::Dinner).await.unwrap_err();
    assert!(matches!(
        error,
        PredictionError::Status { ref model, status: 500 } if model == "dinner"
    ));
}

#[tokio::test]
async fn test_blank_label_is_rejected() {
    let set = classifiers().await;
    let error = predict_slot(&set, MealSlot::Snack).await.unwrap_err();
    assert!(matches!(error, PredictionError::EmptyLabel { .. }));
}

#[tokio::test]
async fn test_slow_model_times_out() {
    let set = classifiers().await;
    let error = predict_slot(&set, MealSlot::Exercise).await.unwrap_err();
    assert!(matches!(error, PredictionError::Transport { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    init_test_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let set = ClassifierSet::from_http(&format!("http://{address}"), Duration::from_secs(1)).unwrap();
    let error = predict_slot(&set, MealSlot::Lunch).await.unwrap_err();
    assert!(matches!(error, PredictionError::Transport { ref model, .. } if model == "lunch"));
}

#[tokio::test]
async fn test_schema_mismatch_never_calls_the_model() {
    let set = classifiers().await;
    // An obesity row sent to a meal model
    let input = ModelSchema::obesity().encode(&FeatureVector::new());
    let error = set.for_slot(MealSlot::Lunch).predict(&input).await.unwrap_err();
    assert!(matches!(
        error,
        PredictionError::SchemaMismatch {
            expected: 18,
            actual: 8,
            ..
        }
    ));
}
