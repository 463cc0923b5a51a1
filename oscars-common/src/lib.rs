//! # oscars-common
//!
//! Shared code for the oscars-ranker workspace:
//! - Error type used across crates
//! - TOML bootstrap configuration
//! - Root folder resolution and initialization

pub mod config;
pub mod error;

pub use error::{Error, Result};
