// ABOUTME: Command-line entry point computing the yearly statistics report from the SQLite store
// ABOUTME: Loads env configuration, applies CLI overrides, runs the engine, and upserts unless dry-run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Yearbook Binary
//!
//! Computes every configured year and replaces the stored report document.

use std::sync::Arc;

use anyhow::Result;
use athlete_yearbook::config::StatsConfig;
use athlete_yearbook::logging;
use athlete_yearbook::statistics::StatisticsEngine;
use athlete_yearbook::stores::SqliteStore;
use clap::Parser;
use tracing::{error, info};

/// Command-line overrides for the environment configuration
#[derive(Parser)]
#[command(name = "yearbook")]
#[command(about = "Compute yearly activity statistics and 12-minute aerobic estimates")]
pub struct Args {
    /// Database URL (overrides `DATABASE_URL`)
    #[arg(long)]
    database_url: Option<String>,

    /// First year of the report (overrides `YEARBOOK_FIRST_YEAR`)
    #[arg(long)]
    first_year: Option<i32>,

    /// Last year of the report (overrides `YEARBOOK_LAST_YEAR`)
    #[arg(long)]
    last_year: Option<i32>,

    /// Compute and print the report without storing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let config = StatsConfig::read_env()?.with_overrides(
        args.database_url.as_deref(),
        args.first_year,
        args.last_year,
    );
    config.validate()?;

    info!(
        database = %config.database,
        years = %format!("{}..={}", config.first_year, config.last_year),
        dry_run = args.dry_run,
        "Opening activity store"
    );
    let store = Arc::new(SqliteStore::connect(&config.database).await?);
    let engine = StatisticsEngine::new(store.clone(), store.clone(), store, config);

    let today = chrono::Local::now().date_naive();
    let outcome = if args.dry_run {
        engine.compute(today).await
    } else {
        engine.run(today).await
    };

    match outcome {
        Ok(report) => {
            if args.dry_run {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            info!(years = report.years.len(), "Yearbook complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Yearbook run failed, nothing was stored");
            Err(e.into())
        }
    }
}
