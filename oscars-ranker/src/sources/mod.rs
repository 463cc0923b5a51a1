//! External data sources
//!
//! - [`AwardsSource`]: one-shot read of the nominations dataset
//! - [`MovieSource`]: per-title movie metadata lookup
//!
//! The pipeline only talks to these traits, so tests substitute in-process
//! fakes for the HTTP clients.

pub mod datapackage;
pub mod omdb;

#[cfg(test)]
mod test_server;

use async_trait::async_trait;
use serde_json::Value;

pub use datapackage::{AwardsSourceError, DataPackageClient};
pub use omdb::{MovieSourceError, OmdbClient, OmdbSettings};

/// Published nominations dataset
#[async_trait]
pub trait AwardsSource: Send + Sync {
    /// Every row of the tabular export, as positional JSON arrays
    async fn fetch_rows(&self) -> Result<Vec<Value>, AwardsSourceError>;
}

/// Movie metadata lookup keyed by title
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Raw payload for `title`. Not-found answers are returned as payloads,
    /// not errors.
    async fn lookup(&self, title: &str) -> Result<Value, MovieSourceError>;
}
