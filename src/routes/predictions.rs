// ABOUTME: Route handlers for per-slot meal and exercise suggestions and obesity prediction
// ABOUTME: One POST endpoint per slot answering with the slot's label and assigned calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use super::users::{parse_user_id, today};
use crate::errors::AppError;
use crate::models::{MealSlot, MealSuggestion};
use crate::resources::ServerResources;

/// Prediction routes handler
pub struct PredictionRoutes;

impl PredictionRoutes {
    /// Create `predict-obesity` plus one `predict-<slot>` route per slot
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let router = MealSlot::ALL.iter().fold(Router::new(), |router, &slot| {
            router.route(
                &format!("/api/users/:user_id/predict-{slot}"),
                post(
                    move |state: State<Arc<ServerResources>>, path: Path<String>| {
                        Self::handle_suggest(state, path, slot)
                    },
                ),
            )
        });

        router
            .route(
                "/api/users/:user_id/predict-obesity",
                post(Self::handle_obesity),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users/:user_id/predict-<slot>
    async fn handle_suggest(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        slot: MealSlot,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let suggestion = resources
            .recommendations
            .suggest(user_id, slot, today())
            .await?;

        Ok((StatusCode::OK, Json(suggestion_body(&suggestion))).into_response())
    }

    /// Handle POST /api/users/:user_id/predict-obesity
    async fn handle_obesity(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let label = resources
            .recommendations
            .predict_obesity(user_id, today())
            .await?;

        Ok((StatusCode::OK, Json(json!({ "obesity_prediction": label }))).into_response())
    }
}

/// `{"<slot>_suggestion": label, "calories": n}`
fn suggestion_body(suggestion: &MealSuggestion) -> Value {
    let mut body = Map::new();
    body.insert(
        suggestion.slot.response_key().to_owned(),
        Value::String(suggestion.label.clone()),
    );
    body.insert("calories".to_owned(), json!(suggestion.calories));
    Value::Object(body)
}
