// ABOUTME: Store abstraction layer for activities, telemetry series, and the persisted report
// ABOUTME: Async traits with in-memory and SQLite adapters sharing one query semantics

//! Store traits
//!
//! The orchestrator reads from an [`ActivityStore`] and a [`TelemetryStore`]
//! and writes one document to a [`ReportStore`]. Adapters own their failure
//! modes and report them as `AppError`; no retries happen here.

use async_trait::async_trait;
use yearbook_core::errors::AppResult;
use yearbook_core::models::{Activity, ActivityField, ActivityId, TelemetrySeries, WholeReport};

use crate::query::{ActivityQuery, TopQuery};

/// In-memory adapter
pub mod memory;

/// `SQLite` adapter
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Read access to recorded activities
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Matching activities ordered by local start time, then identifier
    async fn filter(&self, query: &ActivityQuery) -> AppResult<Vec<Activity>>;

    /// Number of matching activities
    async fn count(&self, query: &ActivityQuery) -> AppResult<u64>;

    /// Sum of `field` over matching activities, `0.0` when nothing matches
    async fn sum(&self, query: &ActivityQuery, field: ActivityField) -> AppResult<f64>;

    /// Identifiers of the top matching activities
    ///
    /// Equal sort values keep start-time order.
    async fn top(&self, query: &TopQuery) -> AppResult<Vec<ActivityId>>;
}

/// Read access to per-activity telemetry
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Series for an activity, `None` when the store has none
    async fn get_series(&self, activity_id: ActivityId) -> AppResult<Option<TelemetrySeries>>;
}

/// Persistence for the whole report
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Replace the document stored under `key`
    async fn upsert(&self, key: &str, report: &WholeReport) -> AppResult<()>;

    /// Stored document text, `None` if nothing was written under `key`
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
}

/// Canonical document text for a report
///
/// Field order follows the model definitions, so equal reports always encode
/// to identical bytes.
///
/// # Errors
///
/// Returns `SerializationError` if the report cannot be encoded
pub fn encode_report(report: &WholeReport) -> AppResult<String> {
    Ok(serde_json::to_string(report)?)
}
