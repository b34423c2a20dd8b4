//! Common types and utilities shared across arbor.
//!
//! This module contains:
//! - Configuration constants and [`TreeConfig`]
//! - Error types

pub mod config;
pub mod error;

pub use config::TreeConfig;
pub use error::{Error, Result};
