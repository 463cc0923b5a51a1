//! Cache-backed retrieval of the awards and movie datasets
//!
//! A populated cache is complete for the run and short-circuits every
//! network call. Otherwise awards are fetched, enriched with movie metadata,
//! and the combined entry is saved once.

use super::awards_fetcher::fetch_awards;
use super::movie_enricher::{enrich_movies, EnrichmentReport};
use crate::cache::{CacheEntry, CacheStore};
use crate::error::PipelineResult;
use crate::sources::{AwardsSource, MovieSource};
use tracing::info;

/// Connected external sources
pub struct Sources {
    pub awards: Box<dyn AwardsSource>,
    pub movies: Box<dyn MovieSource>,
}

/// Fetch both datasets, merge them into `cache` and save it
pub async fn refresh_cache(
    store: &CacheStore,
    cache: &mut CacheEntry,
    awards_source: &dyn AwardsSource,
    movie_source: &dyn MovieSource,
) -> PipelineResult<EnrichmentReport> {
    let awards_data = fetch_awards(awards_source).await?;
    let enrichment = enrich_movies(movie_source, &awards_data).await?;

    cache.merge(CacheEntry {
        awards_data,
        movies_data: enrichment.movies,
    });
    store.save(cache)?;

    Ok(enrichment.report)
}

/// Load the cache, fetching everything when it is not populated.
///
/// `connect` is only called when a fetch is needed, so a warm cache needs
/// no credentials.
pub async fn retrieve_with_cache<F>(store: &CacheStore, connect: F) -> PipelineResult<CacheEntry>
where
    F: FnOnce() -> PipelineResult<Sources>,
{
    let mut cache = store.load();

    if cache.is_populated() {
        info!("Using cache");
        return Ok(cache);
    }

    info!("Cache empty, fetching awards and movie data");
    let sources = connect()?;
    refresh_cache(store, &mut cache, sources.awards.as_ref(), sources.movies.as_ref()).await?;
    Ok(cache)
}
