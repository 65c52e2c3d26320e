// ABOUTME: HTTP adapter invoking a trained model behind a model-serving endpoint
// ABOUTME: Posts one fixed-width row per call and reads the predicted label back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Classifier;
use crate::errors::PredictionError;
use async_trait::async_trait;
use mealplan_intelligence::features::{ModelInput, ModelSchema};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Request body: one row in the model's trained column order
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    columns: &'a [String],
    data: [&'a [f64]; 1],
}

/// Serving endpoints answer with either a single label or a one-row batch
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Prediction {
    Label(String),
    Batch(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: Option<Prediction>,
}

/// Classifier served at `{base_url}/models/{name}/predict`
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    name: String,
    endpoint: String,
    width: usize,
}

impl HttpClassifier {
    /// Create a classifier for the model described by `schema`
    #[must_use]
    pub fn new(client: Client, base_url: &str, schema: ModelSchema) -> Self {
        let endpoint = format!(
            "{}/models/{}/predict",
            base_url.trim_end_matches('/'),
            schema.model
        );
        Self {
            client,
            name: schema.model.to_owned(),
            endpoint,
            width: schema.columns.len(),
        }
    }

    /// Full prediction URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn check_width(&self, input: &ModelInput) -> Result<(), PredictionError> {
        let actual = input.values.len();
        if actual != self.width || input.columns.len() != self.width {
            return Err(PredictionError::SchemaMismatch {
                model: self.name.clone(),
                expected: self.width,
                actual,
            });
        }
        Ok(())
    }

    fn extract_label(&self, body: &str) -> Result<String, PredictionError> {
        let response: PredictResponse = serde_json::from_str(body).map_err(|e| {
            error!(
                model = %self.name,
                "Failed to parse prediction response: {e} - body: {}",
                body.chars().take(200).collect::<String>()
            );
            PredictionError::malformed(&self.name, e.to_string())
        })?;

        let label = match response.prediction {
            Some(Prediction::Label(label)) => label,
            Some(Prediction::Batch(labels)) => labels.into_iter().next().unwrap_or_default(),
            None => {
                return Err(PredictionError::malformed(
                    &self.name,
                    "response has no 'prediction' field",
                ))
            }
        };

        let label = label.trim();
        if label.is_empty() {
            return Err(PredictionError::EmptyLabel {
                model: self.name.clone(),
            });
        }
        Ok(label.to_owned())
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, input), fields(model = %self.name))]
    async fn predict(&self, input: &ModelInput) -> Result<String, PredictionError> {
        self.check_width(input)?;

        let request = PredictRequest {
            columns: input.columns.as_slice(),
            data: [input.values.as_slice()],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send prediction request to {}: {e}", self.endpoint);
                PredictionError::transport(&self.name, e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read prediction response: {e}");
            PredictionError::transport(&self.name, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), "Model endpoint returned an error");
            return Err(PredictionError::Status {
                model: self.name.clone(),
                status: status.as_u16(),
            });
        }

        let label = self.extract_label(&body)?;
        debug!(%label, "Prediction received");
        Ok(label)
    }
}
