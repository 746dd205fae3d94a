// ABOUTME: Configuration module for the yearly statistics run
// ABOUTME: Environment-driven settings for the year range, scanner parameters, and store location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the athlete yearbook
//!
//! - **Environment**: statistics and database settings read from environment
//!   variables, validated before a run

/// Environment-based configuration
pub mod environment;

pub use environment::{DatabaseUrl, StatsConfig};
