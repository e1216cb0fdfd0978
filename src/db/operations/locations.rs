use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone)]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
    pub translated_name: String,
    pub translated_name_anglicized: String,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub translated_name: String,
    pub translated_name_anglicized: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationInsert {
    Created(i64),
    AlreadyExists(i64),
}

/// Single conflict-aware insert; the UNIQUE constraint on `name` decides the
/// winner when two creates race, so no check-then-insert window exists.
pub async fn insert_location(
    pool: &SqlitePool,
    entry: &NewLocation,
) -> Result<LocationInsert, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO "locations" ("name", "translated_name", "translated_name_anglicized")
        VALUES (?1, ?2, ?3)
        ON CONFLICT("name") DO NOTHING
        "#,
    )
    .bind(&entry.name)
    .bind(&entry.translated_name)
    .bind(&entry.translated_name_anglicized)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        let id: i64 = sqlx::query_scalar(r#"SELECT "id" FROM "locations" WHERE "name" = ?1"#)
            .bind(&entry.name)
            .fetch_one(pool)
            .await?;
        return Ok(LocationInsert::AlreadyExists(id));
    }

    Ok(LocationInsert::Created(result.last_insert_rowid()))
}

pub async fn list_locations(pool: &SqlitePool) -> Result<Vec<LocationRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "name", "translated_name", "translated_name_anglicized"
        FROM "locations"
        ORDER BY "id" ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(map_location).collect()
}

fn map_location(row: &SqliteRow) -> Result<LocationRecord, sqlx::Error> {
    Ok(LocationRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        translated_name: row.try_get("translated_name")?,
        translated_name_anglicized: row.try_get("translated_name_anglicized")?,
    })
}
