//! # API Shared
//!
//! Shared utilities and definitions for the triage APIs.
//!
//! Contains:
//! - JSON wire types (`wire` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//! - API-key authentication utilities
//!
//! Used by `api-rest` and the `triage-run` binary.

pub mod auth;
pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
