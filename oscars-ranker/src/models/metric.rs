//! Ranking metrics

use std::fmt;

/// Dimension used to rank the nominees of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Runtime,
    Imdb,
    RottenTomatoes,
    Metascore,
}

impl Metric {
    /// Menu order
    pub const ALL: [Metric; 4] = [
        Metric::Runtime,
        Metric::Imdb,
        Metric::RottenTomatoes,
        Metric::Metascore,
    ];

    /// 1-based menu index
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> usize {
        match self {
            Metric::Runtime => 1,
            Metric::Imdb => 2,
            Metric::RottenTomatoes => 3,
            Metric::Metascore => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Runtime => "Runtime",
            Metric::Imdb => "IMDb Rating",
            Metric::RottenTomatoes => "Rotten Tomatoes Score",
            Metric::Metascore => "Metascore",
        }
    }

    /// `Movies` column holding this metric. Never derived from user text.
    pub(crate) fn column(self) -> &'static str {
        match self {
            Metric::Runtime => "Runtime",
            Metric::Imdb => "IMDbRating",
            Metric::RottenTomatoes => "RottenTomatoesRating",
            Metric::Metascore => "Metascore",
        }
    }

    pub(crate) fn is_real(self) -> bool {
        matches!(self, Metric::Imdb)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value of a metric for one nominee
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Real(f64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            MetricValue::Integer(v) => v as f64,
            MetricValue::Real(v) => v,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(v) => write!(f, "{}", v),
            MetricValue::Real(v) => write!(f, "{:.1}", v),
        }
    }
}
