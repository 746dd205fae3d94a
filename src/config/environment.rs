// ABOUTME: Environment configuration for the statistics run and the SQLite store location
// ABOUTME: Parses YEARBOOK_* variables with defaults and validates ranges before a run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use yearbook_core::constants::{activity_types, calendar, cooper, report};
use yearbook_core::errors::{AppError, AppResult};
use yearbook_core::models::ActivityType;
use yearbook_intelligence::EffortScanner;

/// Default `SQLite` location used by the binary
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/yearbook.db";

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a database URL
    ///
    /// `sqlite::memory:` selects the in-memory database, `sqlite:<path>` a
    /// file; anything else is treated as a bare file path.
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        match s.strip_prefix("sqlite:") {
            Some(":memory:") => Self::Memory,
            Some(path) => Self::SQLite {
                path: PathBuf::from(path),
            },
            None => Self::SQLite {
                path: PathBuf::from(s),
            },
        }
    }

    /// Convert to a connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Settings for one statistics run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// First year of the report (inclusive)
    pub first_year: i32,
    /// Last year of the report (inclusive)
    pub last_year: i32,
    /// Week divisor for `mins_per_week` in the year still in progress
    pub partial_year_weeks: f64,
    /// Minimum best-effort window, seconds
    pub effort_duration_secs: i64,
    /// Largest plausible distance for one window, meters
    pub max_plausible_distance_m: f64,
    /// Key the whole report is stored under
    pub report_key: String,
    /// Activity types that get a per-sport breakdown, in report order
    pub tracked_types: Vec<ActivityType>,
    /// Store location
    pub database: DatabaseUrl,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            first_year: calendar::DEFAULT_FIRST_YEAR,
            last_year: calendar::DEFAULT_LAST_YEAR,
            partial_year_weeks: calendar::DEFAULT_PARTIAL_YEAR_WEEKS,
            effort_duration_secs: cooper::TEST_DURATION_SECS,
            max_plausible_distance_m: cooper::MAX_PLAUSIBLE_DISTANCE_M,
            report_key: report::DEFAULT_REPORT_KEY.to_owned(),
            tracked_types: activity_types::DEFAULT_TRACKED
                .iter()
                .map(|name| ActivityType::from(*name))
                .collect(),
            database: DatabaseUrl::default(),
        }
    }
}

impl StatsConfig {
    /// Load and validate configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but cannot be parsed, and
    /// `ConfigInvalid` when the resulting configuration fails [`Self::validate`].
    pub fn from_env() -> AppResult<Self> {
        let config = Self::read_env()?;
        config.validate()?;
        info!(
            years = %format!("{}..={}", config.first_year, config.last_year),
            partial_year_weeks = config.partial_year_weeks,
            database = %config.database,
            "Loaded statistics configuration"
        );
        Ok(config)
    }

    /// Parse environment variables without validating the result
    ///
    /// Callers that layer further overrides on top (the CLI) validate once
    /// at the end.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but cannot be parsed
    pub fn read_env() -> AppResult<Self> {
        let defaults = Self::default();
        let tracked = env_var_or("YEARBOOK_TRACKED_TYPES", "");

        Ok(Self {
            first_year: env_parse_or("YEARBOOK_FIRST_YEAR", defaults.first_year)?,
            last_year: env_parse_or("YEARBOOK_LAST_YEAR", defaults.last_year)?,
            partial_year_weeks: env_parse_or(
                "YEARBOOK_PARTIAL_YEAR_WEEKS",
                defaults.partial_year_weeks,
            )?,
            effort_duration_secs: env_parse_or(
                "YEARBOOK_EFFORT_DURATION_SECS",
                defaults.effort_duration_secs,
            )?,
            max_plausible_distance_m: env_parse_or(
                "YEARBOOK_MAX_PLAUSIBLE_DISTANCE_M",
                defaults.max_plausible_distance_m,
            )?,
            report_key: env_var_or("YEARBOOK_REPORT_KEY", report::DEFAULT_REPORT_KEY),
            tracked_types: if tracked.trim().is_empty() {
                defaults.tracked_types
            } else {
                parse_types(&tracked)
            },
            database: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)),
        })
    }

    /// Replace the database location and year bounds that are given
    #[must_use]
    pub fn with_overrides(
        mut self,
        database_url: Option<&str>,
        first_year: Option<i32>,
        last_year: Option<i32>,
    ) -> Self {
        if let Some(url) = database_url {
            self.database = DatabaseUrl::parse_url(url);
        }
        if let Some(year) = first_year {
            self.first_year = year;
        }
        if let Some(year) = last_year {
            self.last_year = year;
        }
        self
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an inverted year range, a non-positive
    /// week divisor, window or cap, an empty report key, or no tracked types.
    pub fn validate(&self) -> AppResult<()> {
        if self.first_year > self.last_year {
            return Err(AppError::config_invalid(format!(
                "year range {}..={} is empty",
                self.first_year, self.last_year
            )));
        }
        if !(self.partial_year_weeks.is_finite() && self.partial_year_weeks > 0.0) {
            return Err(AppError::config_invalid(
                "partial-year week divisor must be positive",
            ));
        }
        if self.effort_duration_secs <= 0 {
            return Err(AppError::config_invalid(
                "best-effort window must be a positive number of seconds",
            ));
        }
        if !(self.max_plausible_distance_m.is_finite() && self.max_plausible_distance_m > 0.0) {
            return Err(AppError::config_invalid(
                "plausible distance cap must be positive",
            ));
        }
        if self.report_key.trim().is_empty() {
            return Err(AppError::config_invalid("report key must not be empty"));
        }
        if self.tracked_types.is_empty() {
            return Err(AppError::config_invalid(
                "at least one activity type must be tracked",
            ));
        }
        Ok(())
    }

    /// Years covered by the report, ascending
    #[must_use]
    pub const fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    /// Scanner configured with this run's window and cap
    #[must_use]
    pub const fn scanner(&self) -> EffortScanner {
        EffortScanner::new(self.effort_duration_secs, self.max_plausible_distance_m)
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("{key}={raw:?} is not valid: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse comma-separated activity types
fn parse_types(types_str: &str) -> Vec<ActivityType> {
    types_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ActivityType::from)
        .collect()
}
