//! Award nomination records
//!
//! AwardsSource rows are positional: `[year, category, winner, entity, ...]`.
//! Columns past the fourth are source-defined and ignored.

use crate::error::RecordError;
use serde_json::Value;

/// Enrichment only covers nominations after this year
pub const ENRICHMENT_MIN_YEAR_EXCLUSIVE: i64 = 1940;

/// Normalized award nomination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardRecord {
    pub year: i64,
    pub category: String,
    pub winner: bool,
    /// Nominee name with every `"` removed
    pub entity: String,
}

impl AwardRecord {
    /// Normalize one raw positional row
    pub fn from_raw(raw: &Value) -> Result<Self, RecordError> {
        let columns = raw.as_array().ok_or(RecordError::WrongShape("an award row"))?;
        if columns.len() < 4 {
            return Err(RecordError::invalid(
                "award row",
                format!("{} columns", columns.len()),
            ));
        }

        let year = normalize_year(&columns[0])?;
        let category = columns[1]
            .as_str()
            .ok_or_else(|| RecordError::invalid("category", &columns[1]))?
            .to_string();
        let winner = parse_winner(&columns[2])?;
        let entity = columns[3]
            .as_str()
            .map(strip_quotes)
            .ok_or_else(|| RecordError::invalid("entity", &columns[3]))?;

        Ok(Self {
            year,
            category,
            winner,
            entity,
        })
    }

    /// Best-Picture-class nominations after 1940
    pub fn is_enrichment_candidate(&self) -> bool {
        self.year > ENRICHMENT_MIN_YEAR_EXCLUSIVE
            && self.category.to_lowercase().contains("picture")
    }

    /// Title sent to MovieSource
    pub fn lookup_title(&self) -> String {
        self.entity.to_lowercase()
    }
}

/// Unwrap a singleton sequence and coerce the year to an integer.
///
/// Accepts `1995`, `[1995]`, `"1995"` and ceremony spans such as
/// `"1927/1928"` (first year wins).
pub fn normalize_year(value: &Value) -> Result<i64, RecordError> {
    match value {
        Value::Array(items) if items.len() == 1 => normalize_year(&items[0]),
        Value::Number(n) => n.as_i64().ok_or_else(|| RecordError::invalid("year", n)),
        Value::String(s) => leading_integer(s).ok_or_else(|| RecordError::invalid("year", s)),
        other => Err(RecordError::invalid("year", other)),
    }
}

/// Coerce a bool-like winner flag.
pub fn parse_winner(value: &Value) -> Result<bool, RecordError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(RecordError::invalid("winner", n)),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(RecordError::invalid("winner", s)),
        },
        other => Err(RecordError::invalid("winner", other)),
    }
}

pub fn strip_quotes(text: &str) -> String {
    text.replace('"', "")
}

/// Integer formed by the leading ASCII digits of `text`, if any.
pub(crate) fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
