//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (show, path, init)
//! - [`query`] - One-shot queries (vehicle, trip, bounds, list)
//! - [`watch`] - Periodic refresh until Ctrl+C

pub mod common;
pub mod config;
pub mod query;
pub mod watch;
