// ABOUTME: Core types and constants for the athlete yearbook statistics pipeline
// ABOUTME: Foundation crate with error handling, domain constants, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Yearbook Core
//!
//! Foundation crate providing shared types and constants for the yearly
//! statistics pipeline. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Domain constants (Cooper test, thresholds, calendar defaults)
//! - **models**: Activities, telemetry series, and the yearly report tree

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Activity, TelemetrySeries, YearReport, ...)
pub mod models;
