use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone)]
pub struct WordRecord {
    pub id: i64,
    pub word: String,
    pub translation: String,
    pub anglosax: Option<String>,
    pub picture: Option<String>,
    pub language: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewWord {
    pub word: String,
    pub translation: String,
    pub anglosax: Option<String>,
    pub picture: Option<String>,
    pub language: Option<String>,
    pub timestamp: DateTime<Utc>,
}

pub async fn insert_word(pool: &SqlitePool, entry: &NewWord) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO "translations" ("word", "translation", "anglosax", "picture", "timestamp", "language")
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&entry.word)
    .bind(&entry.translation)
    .bind(&entry.anglosax)
    .bind(&entry.picture)
    .bind(entry.timestamp)
    .bind(&entry.language)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn list_words(pool: &SqlitePool) -> Result<Vec<WordRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "word", "translation", "anglosax", "picture", "language", "timestamp"
        FROM "translations"
        ORDER BY "id" ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(map_word).collect()
}

/// Rows whose timestamp falls within `[start, end]`, newest first. A `None`
/// limit returns every match (SQLite treats LIMIT -1 as unbounded).
pub async fn words_between(
    pool: &SqlitePool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: Option<i64>,
) -> Result<Vec<WordRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "word", "translation", "anglosax", "picture", "language", "timestamp"
        FROM "translations"
        WHERE "timestamp" BETWEEN ?1 AND ?2
        ORDER BY "timestamp" DESC
        LIMIT ?3
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;
    rows.iter().map(map_word).collect()
}

pub async fn words_by_language_between(
    pool: &SqlitePool,
    language: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<WordRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "word", "translation", "anglosax", "picture", "language", "timestamp"
        FROM "translations"
        WHERE "language" = ?1 AND "timestamp" BETWEEN ?2 AND ?3
        ORDER BY "timestamp" DESC
        LIMIT ?4
        "#,
    )
    .bind(language)
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.iter().map(map_word).collect()
}

fn map_word(row: &SqliteRow) -> Result<WordRecord, sqlx::Error> {
    Ok(WordRecord {
        id: row.try_get("id")?,
        word: row.try_get("word")?,
        translation: row.try_get("translation")?,
        anglosax: row.try_get("anglosax")?,
        picture: row.try_get("picture")?,
        language: row.try_get("language")?,
        timestamp: row.try_get("timestamp")?,
    })
}
