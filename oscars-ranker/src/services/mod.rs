//! Pipeline services: fetch, enrich, cache and reconcile

pub mod awards_fetcher;
pub mod data_retrieval;
pub mod movie_enricher;
pub mod reconciler;

pub use awards_fetcher::fetch_awards;
pub use data_retrieval::{refresh_cache, retrieve_with_cache, Sources};
pub use movie_enricher::{enrich_movies, Enrichment, EnrichmentReport, MovieAccumulator};
pub use reconciler::{populate_awards, populate_movies, reconcile, ReconcileReport, ReconcileSummary};
