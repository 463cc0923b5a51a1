//! Ranking queries over the joined Awards/Movies data
//!
//! Results are returned unsorted and with NULL metric values intact;
//! ordering is left to the renderer.

use crate::models::{Metric, MetricValue};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;

/// One nominee and its metric value
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNominee {
    pub name: String,
    pub value: Option<MetricValue>,
}

/// Distinct categories with at least one linked movie in `year`, numbered from 1.
///
/// Categories are ordered by name.
pub async fn categories_for_year(
    pool: &SqlitePool,
    year: i64,
) -> Result<BTreeMap<usize, String>, sqlx::Error> {
    let categories: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT DISTINCT Category
        FROM Awards
        WHERE MovieID IS NOT NULL AND Year = ?
        ORDER BY Category
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(categories
        .into_iter()
        .enumerate()
        .map(|(i, category)| (i + 1, category))
        .collect())
}

/// Title and metric value for every linked nominee of `category` whose
/// movie was released in `year`.
///
/// The year filter is on `Movies.MovieYear`, not the ceremony year the
/// category menu uses.
pub async fn rank_nominees(
    pool: &SqlitePool,
    year: i64,
    category: &str,
    metric: Metric,
) -> Result<Vec<RankedNominee>, sqlx::Error> {
    // The column name comes from the Metric enum, values are bound
    let sql = format!(
        r#"
        SELECT DISTINCT Movies.Title AS Title, Movies.{} AS Value
        FROM Awards
        JOIN Movies ON Awards.MovieID = Movies.Id
        WHERE Movies.MovieYear = ? AND Awards.Category = ?
        "#,
        metric.column()
    );

    let rows = sqlx::query(&sql)
        .bind(year)
        .bind(category)
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| {
            let value = if metric.is_real() {
                row.try_get::<Option<f64>, _>("Value")?.map(MetricValue::Real)
            } else {
                row.try_get::<Option<i64>, _>("Value")?.map(MetricValue::Integer)
            };
            Ok(RankedNominee {
                name: row.try_get("Title")?,
                value,
            })
        })
        .collect()
}
