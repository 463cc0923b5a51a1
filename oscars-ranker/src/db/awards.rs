//! Award row operations

use crate::models::AwardRecord;
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Stored award with its generated id and resolved movie link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAward {
    pub id: i64,
    pub record: AwardRecord,
    pub movie_id: Option<i64>,
}

/// Insert an award row, returning its generated id
pub async fn insert_award(
    conn: &mut SqliteConnection,
    award: &AwardRecord,
    movie_id: Option<i64>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO Awards (Year, Category, Winner, Entity, MovieID) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(award.year)
    .bind(&award.category)
    .bind(i64::from(award.winner))
    .bind(&award.entity)
    .bind(movie_id)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All awards in insertion order
pub async fn load_awards(pool: &SqlitePool) -> Result<Vec<StoredAward>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT Id, Year, Category, Winner, Entity, MovieID FROM Awards ORDER BY Id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let winner: i64 = row.try_get("Winner")?;
            Ok(StoredAward {
                id: row.try_get("Id")?,
                record: AwardRecord {
                    year: row.try_get("Year")?,
                    category: row.try_get("Category")?,
                    winner: winner != 0,
                    entity: row.try_get("Entity")?,
                },
                movie_id: row.try_get("MovieID")?,
            })
        })
        .collect()
}
