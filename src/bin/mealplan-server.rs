// ABOUTME: Server binary for the meal and exercise recommendation API
// ABOUTME: Loads configuration, opens the database, wires the HTTP classifiers, and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mealplan Server Binary
//!
//! Configuration comes from the environment; the flags below override it.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mealplan_server::classifiers::ClassifierSet;
use mealplan_server::config::environment::{DatabaseUrl, ServerConfig};
use mealplan_server::database::Database;
use mealplan_server::resources::ServerResources;
use mealplan_server::{logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mealplan-server")]
#[command(about = "Meal and exercise recommendation API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/mealplan.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&database_url)?;
    }

    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    let classifiers =
        ClassifierSet::from_http(&config.classifier.base_url, config.classifier.timeout())?;

    let resources = Arc::new(ServerResources::new(
        config,
        Arc::new(database),
        classifiers,
    ));

    if let Err(e) = server::serve(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }
    Ok(())
}
