// ABOUTME: Main library entry point for the athlete yearbook statistics pipeline
// ABOUTME: Wires configuration, logging, typed store queries, store adapters, and the yearly orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Athlete Yearbook
//!
//! Derives yearly fitness statistics for one athlete from a store of recorded
//! activities and per-activity telemetry, and persists them as a single
//! report document.
//!
//! ## Architecture
//!
//! - **`yearbook_core`**: errors, constants, and data models
//! - **`yearbook_intelligence`**: the best-effort window scanner and the
//!   aerobic estimator (pure, no I/O)
//! - **Query**: typed activity filters (type, half-open date window, thresholds)
//! - **Stores**: activity, telemetry and report store traits with in-memory
//!   and `SQLite` adapters
//! - **Statistics**: the yearly orchestrator assembling a [`WholeReport`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use athlete_yearbook::config::StatsConfig;
//! use athlete_yearbook::statistics::StatisticsEngine;
//! use athlete_yearbook::stores::MemoryStore;
//! use yearbook_core::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = StatsConfig::from_env()?;
//!     let store = Arc::new(MemoryStore::new());
//!     let engine = StatisticsEngine::new(store.clone(), store.clone(), store, config);
//!
//!     let today = chrono::Local::now().date_naive();
//!     let report = engine.run(today).await?;
//!     println!("{} years computed", report.years.len());
//!     Ok(())
//! }
//! ```
//!
//! [`WholeReport`]: yearbook_core::models::WholeReport

/// Environment-based configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Typed activity queries
pub mod query;

/// Store traits and adapters
pub mod stores;

/// Yearly statistics orchestrator
pub mod statistics;

pub use yearbook_core::{constants, errors, models};
