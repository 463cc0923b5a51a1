//! Movie row operations

use crate::models::MovieRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Stored movie with its generated id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMovie {
    pub id: i64,
    pub row: MovieRow,
}

/// Insert a movie row, returning its generated id
pub async fn insert_movie(conn: &mut SqliteConnection, movie: &MovieRow) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO Movies (Title, MovieYear, Runtime, IMDbRating, RottenTomatoesRating, Metascore)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&movie.title)
    .bind(movie.movie_year)
    .bind(movie.runtime)
    .bind(movie.imdb_rating)
    .bind(movie.rotten_tomatoes)
    .bind(movie.metascore)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Id of the first movie whose title equals `title` exactly
pub async fn find_movie_id_by_title(
    conn: &mut SqliteConnection,
    title: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT Id FROM Movies WHERE Title = ? ORDER BY Id LIMIT 1")
        .bind(title)
        .fetch_optional(conn)
        .await
}

/// All movies in insertion order
pub async fn load_movies(pool: &SqlitePool) -> Result<Vec<StoredMovie>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT Id, Title, MovieYear, Runtime, IMDbRating, RottenTomatoesRating, Metascore
        FROM Movies
        ORDER BY Id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(StoredMovie {
                id: row.try_get("Id")?,
                row: MovieRow {
                    title: row.try_get("Title")?,
                    movie_year: row.try_get("MovieYear")?,
                    runtime: row.try_get("Runtime")?,
                    imdb_rating: row.try_get("IMDbRating")?,
                    rotten_tomatoes: row.try_get("RottenTomatoesRating")?,
                    metascore: row.try_get("Metascore")?,
                },
            })
        })
        .collect()
}
