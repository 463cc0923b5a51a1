//! Movie metadata records returned by MovieSource
//!
//! Parsing is a pure per-record function: every derived field starts from
//! nothing for each record, so a value can never leak from one movie into
//! the next.

use super::award::leading_integer;
use crate::error::RecordError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const ROTTEN_TOMATOES_SOURCE: &str = "Rotten Tomatoes";

/// Raw OMDb payload (string-typed, every field optional)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MovieRecord {
    #[serde(rename = "Title", default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(rename = "Year", default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "lenient_string")]
    pub runtime: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_string")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Metascore", default, deserialize_with = "lenient_string")]
    pub metascore: Option<String>,
    #[serde(rename = "Ratings", default, deserialize_with = "lenient_ratings")]
    pub ratings: Vec<SourceRating>,
    /// `"False"` on a not-found answer
    #[serde(rename = "Response", default, deserialize_with = "lenient_string")]
    pub response: Option<String>,
    #[serde(rename = "Error", default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

/// One entry of the `Ratings` list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceRating {
    #[serde(rename = "Source", default)]
    pub source: String,
    #[serde(rename = "Value", default)]
    pub value: String,
}

impl MovieRecord {
    /// Not-found payloads carry `Response: "False"` or lack a title
    pub fn is_not_found(&self) -> bool {
        let negative = self
            .response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"));
        negative || self.title.is_none()
    }
}

/// Parsed row for the `Movies` table
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub title: String,
    pub movie_year: i64,
    /// Minutes
    pub runtime: i64,
    pub imdb_rating: Option<f64>,
    pub rotten_tomatoes: Option<i64>,
    pub metascore: Option<i64>,
}

impl MovieRow {
    /// Parse a raw cached payload into a row
    pub fn from_raw(raw: &Value) -> Result<Self, RecordError> {
        if !raw.is_object() {
            return Err(RecordError::WrongShape("a movie object"));
        }
        let record: MovieRecord = serde_json::from_value(raw.clone())
            .map_err(|e| RecordError::invalid("movie record", e))?;
        Self::from_record(&record)
    }

    pub fn from_record(record: &MovieRecord) -> Result<Self, RecordError> {
        if record.is_not_found() {
            let reason = record
                .error
                .clone()
                .unwrap_or_else(|| "no title in payload".to_string());
            return Err(RecordError::NotFound(reason));
        }

        let title = record
            .title
            .clone()
            .ok_or(RecordError::MissingField("Title"))?;

        let year_text = record.year.as_deref().ok_or(RecordError::MissingField("Year"))?;
        let movie_year =
            leading_integer(year_text).ok_or_else(|| RecordError::invalid("Year", year_text))?;

        let runtime_text = record
            .runtime
            .as_deref()
            .ok_or(RecordError::MissingField("Runtime"))?;
        let runtime = parse_runtime(runtime_text)
            .ok_or_else(|| RecordError::invalid("Runtime", runtime_text))?;

        Ok(Self {
            title,
            movie_year,
            runtime,
            imdb_rating: record.imdb_rating.as_deref().and_then(parse_imdb_rating),
            rotten_tomatoes: rotten_tomatoes_score(&record.ratings),
            metascore: record.metascore.as_deref().and_then(parse_metascore),
        })
    }
}

/// `"178 min"` → 178. Text without a leading number (e.g. `"N/A"`) has no runtime.
pub fn parse_runtime(text: &str) -> Option<i64> {
    leading_integer(text)
}

/// `"8.3"` → 8.3, anything non-numeric → `None`
pub fn parse_imdb_rating(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Only purely numeric metascores count
pub fn parse_metascore(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Percentage from the first Rotten Tomatoes entry, `"75%"` → 75
pub fn rotten_tomatoes_score(ratings: &[SourceRating]) -> Option<i64> {
    ratings
        .iter()
        .find(|r| r.source == ROTTEN_TOMATOES_SOURCE)
        .and_then(|r| r.value.trim().strip_suffix('%'))
        .and_then(|v| v.trim().parse().ok())
}

/// Accept strings, numbers and null for OMDb's string-typed fields
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Ratings list that never rejects the record: null or a non-list yields
/// no ratings, non-object entries are dropped and scalar values stringified
fn lenient_ratings<'de, D>(deserializer: D) -> Result<Vec<SourceRating>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let entries = match value {
        Some(Value::Array(entries)) => entries,
        _ => return Ok(Vec::new()),
    };

    Ok(entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| SourceRating {
            source: scalar_text(entry.get("Source")),
            value: scalar_text(entry.get("Value")),
        })
        .collect())
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
