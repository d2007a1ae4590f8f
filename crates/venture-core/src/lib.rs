//! Core domain layer for the Venture planning assistant.
//!
//! Holds the seed data every section reads from, the derived-metric
//! helpers that fold collections into summary numbers, and the shared
//! configuration defaults. Nothing in this crate performs I/O; all data
//! lives in process memory for the lifetime of the app.

pub mod config;
pub mod drafts;
pub mod error;
pub mod metrics;
pub mod seed;
pub mod types;
