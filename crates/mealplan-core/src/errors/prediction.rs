// ABOUTME: Classifier-specific error types for the pluggable prediction models
// ABOUTME: Provides structured errors that integrate with the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prediction Error Types
//!
//! Errors raised by classifier adapters. Every variant converts into an
//! [`AppError`] carrying [`ErrorCode::PredictionFailed`].

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors specific to classifier invocation
#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    /// The model could not be reached
    #[error("model '{model}' unreachable: {details}")]
    Transport {
        /// Model name
        model: String,
        /// Transport failure details
        details: String,
    },
    /// The model endpoint answered with a non-success status
    #[error("model '{model}' returned status {status}")]
    Status {
        /// Model name
        model: String,
        /// HTTP status returned
        status: u16,
    },
    /// The model answered with a body that carries no usable label
    #[error("model '{model}' returned a malformed response: {details}")]
    MalformedResponse {
        /// Model name
        model: String,
        /// Parse failure details
        details: String,
    },
    /// The model produced an empty label
    #[error("model '{model}' returned an empty label")]
    EmptyLabel {
        /// Model name
        model: String,
    },
    /// The input did not match the model's column schema
    #[error("model '{model}' expects {expected} columns, got {actual}")]
    SchemaMismatch {
        /// Model name
        model: String,
        /// Expected column count
        expected: usize,
        /// Supplied column count
        actual: usize,
    },
}

impl PredictionError {
    /// Create a transport error
    #[must_use]
    pub fn transport(model: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Transport {
            model: model.into(),
            details: details.into(),
        }
    }

    /// Create a malformed response error
    #[must_use]
    pub fn malformed(model: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedResponse {
            model: model.into(),
            details: details.into(),
        }
    }

    /// Get the model name associated with this error
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::Transport { model, .. }
            | Self::Status { model, .. }
            | Self::MalformedResponse { model, .. }
            | Self::EmptyLabel { model }
            | Self::SchemaMismatch { model, .. } => model,
        }
    }
}

impl From<PredictionError> for AppError {
    fn from(error: PredictionError) -> Self {
        let resource = error.model().to_owned();
        Self::new(ErrorCode::PredictionFailed, error.to_string())
            .with_resource_id(resource)
            .with_source(error)
    }
}
