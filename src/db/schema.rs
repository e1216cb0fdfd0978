use std::collections::HashSet;

use sqlx::{Row, SqlitePool};

const CREATE_TRANSLATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS "translations" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "word" TEXT,
    "timestamp" TEXT,
    "translation" TEXT,
    "anglosax" TEXT,
    "picture" TEXT,
    "language" TEXT
)
"#;

const CREATE_LOCATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS "locations" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "name" TEXT NOT NULL UNIQUE,
    "translated_name" TEXT NOT NULL,
    "translated_name_anglicized" TEXT NOT NULL
)
"#;

// A store created by an older build picks up any column it is missing on the
// next start; a fresh store already has all of them, so no ALTER runs and the
// pool never serves rows wider than its prepared-statement metadata.
const TRANSLATION_COLUMNS: &[(&str, &str)] = &[
    ("word", "TEXT"),
    ("timestamp", "TEXT"),
    ("translation", "TEXT"),
    ("anglosax", "TEXT"),
    ("picture", "TEXT"),
    ("language", "TEXT"),
];

pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TRANSLATIONS).execute(pool).await?;
    sqlx::query(CREATE_LOCATIONS).execute(pool).await?;
    ensure_translation_columns(pool).await?;
    Ok(())
}

async fn ensure_translation_columns(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let rows = sqlx::query(r#"PRAGMA table_info("translations")"#)
        .fetch_all(pool)
        .await?;

    let existing: HashSet<String> = rows
        .iter()
        .filter_map(|row| row.try_get::<String, _>("name").ok())
        .collect();

    for (name, column_type) in TRANSLATION_COLUMNS {
        if existing.contains(*name) {
            continue;
        }
        let statement = format!(r#"ALTER TABLE "translations" ADD COLUMN "{name}" {column_type}"#);
        sqlx::query(&statement).execute(pool).await?;
        tracing::info!(column = name, "added missing translations column");
    }

    Ok(())
}
