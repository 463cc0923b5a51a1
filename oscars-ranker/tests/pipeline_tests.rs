//! Fetch → enrich → cache integration tests

mod helpers;

use helpers::fakes::{RecordingMovies, StaticAwards};
use helpers::{apollo_13_payload, award, babe_payload, braveheart_payload, sample_awards};
use oscars_ranker::cache::{CacheEntry, CacheStore};
use oscars_ranker::services::{enrich_movies, refresh_cache, retrieve_with_cache, Sources};
use oscars_ranker::{PipelineError, PipelineResult};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> CacheStore {
    CacheStore::new(dir.path().join("final_project_cache.json"))
}

fn full_movies() -> RecordingMovies {
    RecordingMovies::new()
        .with("Braveheart", braveheart_payload())
        .with("Apollo 13", apollo_13_payload())
        .with("Babe", babe_payload())
}

#[tokio::test]
async fn test_only_recent_picture_nominees_are_looked_up() {
    let movies = full_movies();

    let enrichment = enrich_movies(&movies, &sample_awards()).await.unwrap();

    assert_eq!(movies.lookups(), vec!["braveheart", "apollo 13", "babe"]);
    assert_eq!(enrichment.report.candidates, 3);
    assert_eq!(enrichment.movies.len(), 3);
}

#[tokio::test]
async fn test_pre_1941_and_non_picture_rows_issue_no_lookups() {
    let movies = full_movies();
    let awards = vec![
        award(1939, "Best Picture", 1, "Gone with the Wind"),
        award(1940, "Outstanding Production", 1, "Rebecca"),
        award(1995, "Directing", 1, "Braveheart"),
    ];

    let enrichment = enrich_movies(&movies, &awards).await.unwrap();

    assert!(movies.lookups().is_empty());
    assert!(enrichment.movies.is_empty());
}

#[tokio::test]
async fn test_identical_payloads_are_stored_once() {
    let movies = full_movies();
    let awards = vec![
        award(1995, "Best Picture", 1, "Braveheart"),
        award(1995, "Best Motion Picture", 1, "Braveheart"),
    ];

    let enrichment = enrich_movies(&movies, &awards).await.unwrap();

    assert_eq!(movies.lookups().len(), 2);
    assert_eq!(enrichment.movies, vec![braveheart_payload()]);
    assert_eq!(enrichment.report.duplicates, 1);
}

#[tokio::test]
async fn test_rejected_api_key_aborts_enrichment() {
    let movies = RecordingMovies::rejecting_key();

    let result = enrich_movies(&movies, &sample_awards()).await;

    assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
    assert_eq!(movies.lookups().len(), 1);
}

#[tokio::test]
async fn test_refresh_saves_merged_cache() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut cache = CacheEntry::default();

    let report = refresh_cache(&store, &mut cache, &StaticAwards::new(sample_awards()), &full_movies())
        .await
        .unwrap();

    assert_eq!(report.appended, 3);
    assert_eq!(cache.awards_data, sample_awards());
    assert_eq!(store.try_load().unwrap(), cache);
}

#[tokio::test]
async fn test_unreachable_awards_source_is_fatal_and_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut cache = CacheEntry::default();

    let result = refresh_cache(&store, &mut cache, &StaticAwards::unreachable(), &full_movies()).await;

    assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_populated_cache_skips_network() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let cached = CacheEntry {
        awards_data: sample_awards(),
        movies_data: vec![braveheart_payload()],
    };
    store.save(&cached).unwrap();

    let loaded = retrieve_with_cache(&store, || -> PipelineResult<Sources> {
        panic!("sources must not be connected when the cache is populated")
    })
    .await
    .unwrap();

    assert_eq!(loaded, cached);
}

#[tokio::test]
async fn test_empty_cache_fetches_and_persists() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let movies = full_movies();
    let handle = movies.clone();

    let loaded = retrieve_with_cache(&store, move || {
        Ok(Sources {
            awards: Box::new(StaticAwards::new(sample_awards())),
            movies: Box::new(movies),
        })
    })
    .await
    .unwrap();

    assert_eq!(handle.lookups().len(), 3);
    assert_eq!(loaded.movies_data.len(), 3);
    assert_eq!(store.load(), loaded);

    // Second run is served from disk
    let again = retrieve_with_cache(&store, || -> PipelineResult<Sources> {
        panic!("second run must use the cache")
    })
    .await
    .unwrap();
    assert_eq!(again, loaded);
}

#[tokio::test]
async fn test_connect_error_propagates() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let result = retrieve_with_cache(&store, || {
        Err(PipelineError::SourceUnavailable("no API key".to_string()))
    })
    .await;

    assert!(matches!(result, Err(PipelineError::SourceUnavailable(_))));
}
