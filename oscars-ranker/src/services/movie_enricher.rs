//! Movie metadata enrichment for Best-Picture-class nominations
//!
//! One MovieSource lookup per qualifying nomination. Payloads are collected
//! with full-record deduplication: two structurally identical payloads
//! collapse into one entry, regardless of which nominee produced them.

use crate::error::{PipelineError, PipelineResult};
use crate::models::movie::MovieRecord;
use crate::models::AwardRecord;
use crate::sources::{MovieSource, MovieSourceError};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Counters for one enrichment pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Award rows passing the year/category filter
    pub candidates: usize,
    pub lookups: usize,
    pub appended: usize,
    pub duplicates: usize,
    /// Not-found payloads kept in the accumulator
    pub not_found: usize,
    /// Lookups that produced no payload
    pub failures: usize,
    /// Raw award rows that could not be normalized
    pub unparsable_awards: usize,
}

/// Deduplicated payloads plus counters
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub movies: Vec<Value>,
    pub report: EnrichmentReport,
}

/// Ordered, deduplicated collection of raw payloads
#[derive(Debug, Default)]
pub struct MovieAccumulator {
    records: Vec<Value>,
    seen: HashSet<String>,
}

impl MovieAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `payload` unless an identical one is already present
    pub fn push(&mut self, payload: Value) -> bool {
        if self.seen.insert(canonical_key(&payload)) {
            self.records.push(payload);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}

/// Look up every qualifying nomination and collect the payloads.
///
/// Rejected API keys abort the pass; every other lookup failure is logged
/// and skipped.
pub async fn enrich_movies(
    source: &dyn MovieSource,
    awards: &[Value],
) -> PipelineResult<Enrichment> {
    let mut accumulator = MovieAccumulator::new();
    let mut report = EnrichmentReport::default();

    for (index, raw) in awards.iter().enumerate() {
        let award = match AwardRecord::from_raw(raw) {
            Ok(award) => award,
            Err(e) => {
                warn!(index, error = %e, "Skipping unparsable award row");
                report.unparsable_awards += 1;
                continue;
            }
        };

        if !award.is_enrichment_candidate() {
            continue;
        }
        report.candidates += 1;

        let title = award.lookup_title();
        report.lookups += 1;

        let payload = match source.lookup(&title).await {
            Ok(payload) => payload,
            Err(MovieSourceError::InvalidApiKey) => {
                return Err(PipelineError::SourceUnavailable(
                    "MovieSource rejected the API key".to_string(),
                ));
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Movie lookup failed, skipping nominee");
                report.failures += 1;
                continue;
            }
        };

        let not_found = is_not_found_payload(&payload);

        if accumulator.push(payload) {
            report.appended += 1;
            if not_found {
                debug!(title = %title, "MovieSource has no match");
                report.not_found += 1;
            }
        } else {
            report.duplicates += 1;
        }
    }

    info!(
        candidates = report.candidates,
        lookups = report.lookups,
        appended = report.appended,
        duplicates = report.duplicates,
        not_found = report.not_found,
        failures = report.failures,
        movies = accumulator.len(),
        "Movie enrichment complete"
    );

    Ok(Enrichment {
        movies: accumulator.into_records(),
        report,
    })
}

fn is_not_found_payload(payload: &Value) -> bool {
    serde_json::from_value::<MovieRecord>(payload.clone())
        .map(|r| r.is_not_found())
        .unwrap_or(true)
}

/// JSON encoding with object keys sorted, so equal payloads share one key
/// whatever their field order.
fn canonical_key(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accumulator_collapses_identical_payloads() {
        let mut acc = MovieAccumulator::new();
        assert!(acc.push(json!({"Title": "Braveheart", "Year": "1995"})));
        assert!(!acc.push(json!({"Year": "1995", "Title": "Braveheart"})));
        assert!(acc.push(json!({"Title": "Braveheart", "Year": "1996"})));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_canonical_key_sorts_nested_objects() {
        let a = json!({"b": [{"y": 1, "x": 2}], "a": null});
        let b = json!({"a": null, "b": [{"x": 2, "y": 1}]});
        assert_eq!(canonical_key(&a), canonical_key(&b));
        assert_eq!(canonical_key(&a), r#"{"a":null,"b":[{"x":2,"y":1}]}"#);
    }

    #[test]
    fn test_not_found_detection() {
        assert!(is_not_found_payload(&json!({"Response": "False", "Error": "Movie not found!"})));
        assert!(!is_not_found_payload(&json!({"Title": "Braveheart", "Response": "True"})));
        assert!(is_not_found_payload(&json!("garbage")));
    }
}
