//! In-process stand-ins for the HTTP sources

use async_trait::async_trait;
use oscars_ranker::sources::{AwardsSource, AwardsSourceError, MovieSource, MovieSourceError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::not_found_payload;

/// Serves a fixed set of award rows
pub struct StaticAwards {
    rows: Vec<Value>,
    fail: bool,
}

impl StaticAwards {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows, fail: false }
    }

    pub fn unreachable() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl AwardsSource for StaticAwards {
    async fn fetch_rows(&self) -> Result<Vec<Value>, AwardsSourceError> {
        if self.fail {
            return Err(AwardsSourceError::NetworkError("connection refused".to_string()));
        }
        Ok(self.rows.clone())
    }
}

/// Answers lookups from a title → payload table and records every call
#[derive(Clone, Default)]
pub struct RecordingMovies {
    payloads: HashMap<String, Value>,
    lookups: Arc<Mutex<Vec<String>>>,
    reject_key: bool,
}

impl RecordingMovies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: &str, payload: Value) -> Self {
        self.payloads.insert(title.to_lowercase(), payload);
        self
    }

    pub fn rejecting_key() -> Self {
        Self {
            reject_key: true,
            ..Self::default()
        }
    }

    /// Titles looked up so far, in call order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieSource for RecordingMovies {
    async fn lookup(&self, title: &str) -> Result<Value, MovieSourceError> {
        self.lookups.lock().unwrap().push(title.to_string());
        if self.reject_key {
            return Err(MovieSourceError::InvalidApiKey);
        }
        Ok(self
            .payloads
            .get(title)
            .cloned()
            .unwrap_or_else(not_found_payload))
    }
}
