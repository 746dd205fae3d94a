// ABOUTME: In-memory store adapter implementing the activity, telemetry, and report store traits
// ABOUTME: DashMap-backed, used by tests and as the reference behavior for the SQL adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use dashmap::DashMap;
use yearbook_core::errors::AppResult;
use yearbook_core::models::{Activity, ActivityField, ActivityId, TelemetrySeries, WholeReport};

use super::{encode_report, ActivityStore, ReportStore, TelemetryStore};
use crate::query::{ActivityQuery, TopQuery};

/// In-process store for all three store roles
#[derive(Debug, Default)]
pub struct MemoryStore {
    activities: DashMap<ActivityId, Activity>,
    telemetry: DashMap<ActivityId, TelemetrySeries>,
    reports: DashMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given activities
    #[must_use]
    pub fn with_activities(activities: impl IntoIterator<Item = Activity>) -> Self {
        let store = Self::new();
        for activity in activities {
            store.insert_activity(activity);
        }
        store
    }

    /// Add or replace an activity
    pub fn insert_activity(&self, activity: Activity) {
        self.activities.insert(activity.id(), activity);
    }

    /// Add or replace the telemetry of an activity
    pub fn insert_telemetry(&self, series: TelemetrySeries) {
        self.telemetry.insert(series.activity_id(), series);
    }

    /// Number of stored activities
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Matching activities in start-time order
    fn matching(&self, query: &ActivityQuery) -> Vec<Activity> {
        let mut matched: Vec<Activity> = self
            .activities
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by_key(|a| (a.start_date_local(), a.id()));
        matched
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn filter(&self, query: &ActivityQuery) -> AppResult<Vec<Activity>> {
        Ok(self.matching(query))
    }

    async fn count(&self, query: &ActivityQuery) -> AppResult<u64> {
        Ok(self
            .activities
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .count() as u64)
    }

    async fn sum(&self, query: &ActivityQuery, field: ActivityField) -> AppResult<f64> {
        Ok(self
            .matching(query)
            .iter()
            .map(|activity| activity.value_of(field))
            .sum())
    }

    async fn top(&self, query: &TopQuery) -> AppResult<Vec<ActivityId>> {
        let mut ranked = self.matching(&query.filter);
        // stable sort keeps start-time order among equal values
        ranked.sort_by(|a, b| {
            let ordering = a.value_of(query.sort_by).total_cmp(&b.value_of(query.sort_by));
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(ranked
            .iter()
            .take(query.limit)
            .map(Activity::id)
            .collect())
    }
}

#[async_trait]
impl TelemetryStore for MemoryStore {
    async fn get_series(&self, activity_id: ActivityId) -> AppResult<Option<TelemetrySeries>> {
        Ok(self
            .telemetry
            .get(&activity_id)
            .map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn upsert(&self, key: &str, report: &WholeReport) -> AppResult<()> {
        let document = encode_report(report)?;
        self.reports.insert(key.to_owned(), document);
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.reports.get(key).map(|entry| entry.value().clone()))
    }
}

