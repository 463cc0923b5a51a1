//! oscars-ranker library interface
//!
//! Pipeline: fetch nominations, enrich them with movie metadata, cache both,
//! rebuild the SQLite store, then rank nominees interactively.

pub mod cache;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;

pub use crate::error::{PipelineError, PipelineResult};
