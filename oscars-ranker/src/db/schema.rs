//! Schema management for the `Movies` and `Awards` tables
//!
//! The schema is rebuilt from scratch on every run, never migrated.

use sqlx::SqlitePool;

const DROP_AWARDS: &str = r#"DROP TABLE IF EXISTS "Awards""#;
const DROP_MOVIES: &str = r#"DROP TABLE IF EXISTS "Movies""#;

const CREATE_MOVIES: &str = r#"
    CREATE TABLE "Movies" (
        "Id"                    INTEGER PRIMARY KEY AUTOINCREMENT UNIQUE,
        "Title"                 TEXT NOT NULL,
        "MovieYear"             INTEGER NOT NULL,
        "Runtime"               INTEGER NOT NULL,
        "IMDbRating"            REAL,
        "RottenTomatoesRating"  INTEGER,
        "Metascore"             INTEGER
    )
"#;

const CREATE_AWARDS: &str = r#"
    CREATE TABLE "Awards" (
        "Id"                    INTEGER PRIMARY KEY AUTOINCREMENT UNIQUE,
        "Year"                  INTEGER NOT NULL,
        "Category"              TEXT NOT NULL,
        "Winner"                INTEGER NOT NULL CHECK ("Winner" IN (0, 1)),
        "Entity"                TEXT NOT NULL,
        "MovieID"               INTEGER REFERENCES "Movies"("Id")
    )
"#;

const CREATE_MOVIES_TITLE_INDEX: &str =
    r#"CREATE INDEX "idx_movies_title" ON "Movies"("Title")"#;

const CREATE_AWARDS_YEAR_INDEX: &str =
    r#"CREATE INDEX "idx_awards_year_category" ON "Awards"("Year", "Category")"#;

/// Drop and recreate both tables in one transaction.
///
/// A failure rolls back to the previous schema. Safe to call repeatedly.
pub async fn reset_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Awards references Movies, so it goes first
    for statement in [
        DROP_AWARDS,
        DROP_MOVIES,
        CREATE_MOVIES,
        CREATE_AWARDS,
        CREATE_MOVIES_TITLE_INDEX,
        CREATE_AWARDS_YEAR_INDEX,
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!("Database schema reset (Movies, Awards)");
    Ok(())
}
