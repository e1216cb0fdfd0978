use std::str::FromStr;

use chrono::{TimeZone, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Row;
use tempfile::TempDir;

use vocab_backend::db::operations::locations::{insert_location, LocationInsert, NewLocation};
use vocab_backend::db::operations::words::{
    insert_word, list_words, words_between, NewWord,
};
use vocab_backend::db::Database;
use vocab_backend::seed;

fn word_at(minute: u32) -> NewWord {
    NewWord {
        word: format!("word-{minute}"),
        translation: format!("translation-{minute}"),
        anglosax: None,
        picture: None,
        language: None,
        timestamp: Utc
            .with_ymd_and_hms(2024, 6, 7, 10, minute, 0)
            .single()
            .expect("valid timestamp"),
    }
}

async fn table_columns(db: &Database, table: &str) -> Vec<String> {
    let statement = format!(r#"PRAGMA table_info("{table}")"#);
    sqlx::query(&statement)
        .fetch_all(db.pool())
        .await
        .expect("pragma query succeeds")
        .iter()
        .map(|row| row.try_get::<String, _>("name").expect("column name"))
        .collect()
}

#[tokio::test]
async fn fresh_store_lists_rows_through_the_opening_pool() {
    // A brand-new file must serve reads on the very pool that created the
    // schema; growing the table after open would leave the pool's cached
    // statement metadata behind the real column count.
    let temp_dir = TempDir::new().expect("temp dir");
    let db = Database::open(temp_dir.path().join("store.db"))
        .await
        .expect("open");

    insert_word(db.pool(), &word_at(0)).await.expect("insert");

    let words = list_words(db.pool()).await.expect("list");
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "word-0");
    assert_eq!(words[0].translation, "translation-0");
    db.close().await;
}

#[tokio::test]
async fn open_applies_schema_idempotently() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("store.db");

    let db = Database::open(&db_path).await.expect("first open");
    insert_word(db.pool(), &word_at(0)).await.expect("insert");
    db.close().await;

    let db = Database::open(&db_path).await.expect("second open");
    let words = list_words(db.pool()).await.expect("list");
    assert_eq!(words.len(), 1, "reopen keeps existing rows");

    let columns = table_columns(&db, "translations").await;
    for expected in ["id", "word", "timestamp", "translation", "anglosax", "picture", "language"] {
        assert!(columns.iter().any(|c| c == expected), "missing column {expected}");
    }
    db.close().await;
}

#[tokio::test]
async fn open_adds_columns_missing_from_older_stores() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("store.db");

    // A store created before the language/picture columns existed.
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", db_path.display()))
        .expect("options parse")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("raw pool connects");
    sqlx::query(
        r#"CREATE TABLE "translations" ("id" INTEGER PRIMARY KEY AUTOINCREMENT, "word" TEXT)"#,
    )
    .execute(&pool)
    .await
    .expect("partial table created");
    pool.close().await;

    let db = Database::open(&db_path).await.expect("open upgrades schema");
    let columns = table_columns(&db, "translations").await;
    for expected in ["timestamp", "translation", "anglosax", "picture", "language"] {
        assert!(columns.iter().any(|c| c == expected), "column {expected} not added");
    }
    db.close().await;
}

#[tokio::test]
async fn insert_assigns_increasing_positive_ids() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db = Database::open(temp_dir.path().join("store.db"))
        .await
        .expect("open");

    let first = insert_word(db.pool(), &word_at(0)).await.expect("insert");
    let second = insert_word(db.pool(), &word_at(1)).await.expect("insert");

    assert!(first > 0);
    assert!(second > first);
    db.close().await;
}

#[tokio::test]
async fn words_between_orders_newest_first_and_honors_limit() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db = Database::open(temp_dir.path().join("store.db"))
        .await
        .expect("open");

    for minute in 0..5 {
        insert_word(db.pool(), &word_at(minute)).await.expect("insert");
    }

    let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 7).expect("ymd");
    let start = date.and_hms_opt(0, 0, 0).expect("start").and_utc();
    let end = date.and_hms_micro_opt(23, 59, 59, 999_999).expect("end").and_utc();

    let limited = words_between(db.pool(), start, end, Some(3))
        .await
        .expect("query");
    assert_eq!(limited.len(), 3);
    assert_eq!(limited[0].word, "word-4");
    assert_eq!(limited[2].word, "word-2");
    for pair in limited.windows(2) {
        assert!(pair[0].timestamp > pair[1].timestamp);
    }

    let unlimited = words_between(db.pool(), start, end, None)
        .await
        .expect("query");
    assert_eq!(unlimited.len(), 5);
    db.close().await;
}

#[tokio::test]
async fn concurrent_duplicate_location_creates_exactly_one_row() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db = Database::open(temp_dir.path().join("store.db"))
        .await
        .expect("open");

    let entry = NewLocation {
        name: "Paris".to_string(),
        translated_name: "巴黎".to_string(),
        translated_name_anglicized: "Bālí".to_string(),
    };

    let (left, right) = tokio::join!(
        insert_location(db.pool(), &entry),
        insert_location(db.pool(), &entry)
    );
    let left = left.expect("left insert");
    let right = right.expect("right insert");

    let created = [left, right]
        .iter()
        .filter(|outcome| matches!(outcome, LocationInsert::Created(_)))
        .count();
    assert_eq!(created, 1, "exactly one racer wins the insert");

    let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "locations""#)
        .fetch_one(db.pool())
        .await
        .expect("count query");
    assert_eq!(count, 1);
    db.close().await;
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db = Database::open(temp_dir.path().join("store.db"))
        .await
        .expect("open");

    let first = seed::seed_sample_words(&db).await.expect("first seed");
    assert_eq!(first, 12);

    let second = seed::seed_sample_words(&db).await.expect("second seed");
    assert_eq!(second, 0);

    let words = list_words(db.pool()).await.expect("list");
    assert_eq!(words.len(), 12);
    assert!(words.iter().all(|w| w.language.as_deref() == Some("Mandarin")));
    db.close().await;
}
