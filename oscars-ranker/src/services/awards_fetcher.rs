//! Awards dataset retrieval

use crate::error::{PipelineError, PipelineResult};
use crate::sources::AwardsSource;
use serde_json::Value;

/// Pull every nomination row from AwardsSource.
///
/// Any failure is `SourceUnavailable`: without the full dataset nothing
/// downstream is usable.
pub async fn fetch_awards(source: &dyn AwardsSource) -> PipelineResult<Vec<Value>> {
    let rows = source.fetch_rows().await.map_err(|e| {
        tracing::error!(error = %e, "Awards dataset unavailable");
        PipelineError::SourceUnavailable(e.to_string())
    })?;

    if rows.is_empty() {
        return Err(PipelineError::SourceUnavailable(
            "awards dataset is empty".to_string(),
        ));
    }

    tracing::info!(rows = rows.len(), "Fetched awards dataset");
    Ok(rows)
}
