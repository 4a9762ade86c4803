//! Shared utilities for sundry.
//!
//! This crate provides common utilities used across the sundry workspace:
//! - Logging setup with tracing
//! - Order-preserving collection helpers

pub mod collections;
pub mod log;

pub use collections::{dedup_stable, push_unique};
pub use log::{LogConfig, LogLevel};
