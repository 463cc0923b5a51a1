//! Reconciliation of cached raw records into the relational store
//!
//! Movies are populated first; each award's `MovieID` is then resolved by
//! an exact-title lookup against the movies already inserted. Links are
//! resolved once, at insertion time, and never backfilled.
//!
//! Each batch runs in one transaction. A record that fails to parse is
//! reported and skipped; a storage error aborts the batch.

use crate::cache::CacheEntry;
use crate::db::{awards, movies, schema};
use crate::error::{PipelineResult, RecordError};
use crate::models::{AwardRecord, MovieRow};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// A record left out of the store, and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position in the input batch
    pub index: usize,
    pub reason: RecordError,
}

/// Outcome of one population batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub inserted: usize,
    /// Not-found payloads skipped as expected
    pub not_found: usize,
    /// Records rejected as unparsable
    pub skipped: Vec<SkippedRecord>,
    /// Awards inserted with a resolved MovieID
    pub linked: usize,
}

/// Outcome of a full reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileSummary {
    pub movies: ReconcileReport,
    pub awards: ReconcileReport,
}

/// Insert every parseable movie payload
pub async fn populate_movies(pool: &SqlitePool, records: &[Value]) -> PipelineResult<ReconcileReport> {
    let mut report = ReconcileReport::default();
    let mut tx = pool.begin().await?;

    for (index, raw) in records.iter().enumerate() {
        let row = match MovieRow::from_raw(raw) {
            Ok(row) => row,
            Err(reason) if reason.is_not_found() => {
                debug!(index, reason = %reason, "Skipping not-found movie payload");
                report.not_found += 1;
                continue;
            }
            Err(reason) => {
                warn!(index, reason = %reason, "Skipping unparsable movie record");
                report.skipped.push(SkippedRecord { index, reason });
                continue;
            }
        };

        movies::insert_movie(&mut *tx, &row).await?;
        report.inserted += 1;
    }

    tx.commit().await?;

    info!(
        inserted = report.inserted,
        not_found = report.not_found,
        skipped = report.skipped.len(),
        "Movies populated"
    );
    Ok(report)
}

/// Insert every parseable award row, linking it to a movie by title.
///
/// Must run after [`populate_movies`].
pub async fn populate_awards(pool: &SqlitePool, records: &[Value]) -> PipelineResult<ReconcileReport> {
    let mut report = ReconcileReport::default();
    let mut tx = pool.begin().await?;

    for (index, raw) in records.iter().enumerate() {
        let award = match AwardRecord::from_raw(raw) {
            Ok(award) => award,
            Err(reason) => {
                warn!(index, reason = %reason, "Skipping unparsable award record");
                report.skipped.push(SkippedRecord { index, reason });
                continue;
            }
        };

        let movie_id = movies::find_movie_id_by_title(&mut *tx, &award.entity).await?;
        awards::insert_award(&mut *tx, &award, movie_id).await?;

        report.inserted += 1;
        if movie_id.is_some() {
            report.linked += 1;
        }
    }

    tx.commit().await?;

    info!(
        inserted = report.inserted,
        linked = report.linked,
        skipped = report.skipped.len(),
        "Awards populated"
    );
    Ok(report)
}

/// Rebuild the store from a cache entry: reset schema, movies, then awards
pub async fn reconcile(pool: &SqlitePool, cache: &CacheEntry) -> PipelineResult<ReconcileSummary> {
    schema::reset_schema(pool).await?;
    let movies = populate_movies(pool, &cache.movies_data).await?;
    let awards = populate_awards(pool, &cache.awards_data).await?;
    Ok(ReconcileSummary { movies, awards })
}
