//! Shared utilities: errors, results, configuration and templates

pub mod config;
pub mod error;
pub mod error_sink;
pub mod result;
pub mod templates;
