// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Bundles configuration, storage, and the recommendation service behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::classifiers::ClassifierSet;
use crate::config::ServerConfig;
use crate::database::DatabaseProvider;
use crate::services::RecommendationService;

/// Long-lived dependencies created once at startup
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Storage
    pub database: Arc<dyn DatabaseProvider>,
    /// Recommendation orchestration
    pub recommendations: Arc<RecommendationService>,
}

impl ServerResources {
    /// Wire the recommendation service over `database` and `classifiers`
    #[must_use]
    pub fn new(
        config: ServerConfig,
        database: Arc<dyn DatabaseProvider>,
        classifiers: ClassifierSet,
    ) -> Self {
        let recommendations = Arc::new(RecommendationService::new(
            Arc::clone(&database),
            classifiers,
            config.calorie.clone(),
        ));

        Self {
            config: Arc::new(config),
            database,
            recommendations,
        }
    }
}
