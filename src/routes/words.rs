use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::operations::words::{self, NewWord, WordRecord};
use crate::response::AppError;
use crate::state::AppState;

/// Per-day queries return at most this many rows; the UI shows a fixed daily
/// set, so anything older than the 8 newest entries is cut off.
const DAILY_WORD_LIMIT: i64 = 8;

#[derive(Debug, Deserialize)]
pub struct CreateWordRequest {
    word: String,
    translation: String,
    anglosax: Option<String>,
    picture: Option<String>,
    language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct CreateWordResponse {
    success: bool,
    id: i64,
}

#[derive(Serialize)]
pub struct WordResponse {
    id: i64,
    word: String,
    translation: String,
    anglosax: Option<String>,
    picture: Option<String>,
    timestamp: String,
    language: Option<String>,
}

/// Redacted shape for the voice-agent polling endpoint: never carries
/// `picture` or `translation`.
#[derive(Serialize)]
pub struct WordSummary {
    id: i64,
    word: String,
    anglosax: Option<String>,
    timestamp: String,
    language: Option<String>,
}

impl From<WordRecord> for WordResponse {
    fn from(record: WordRecord) -> Self {
        Self {
            id: record.id,
            word: record.word,
            translation: record.translation,
            anglosax: record.anglosax,
            picture: record.picture,
            timestamp: iso_timestamp(record.timestamp),
            language: record.language,
        }
    }
}

impl From<WordRecord> for WordSummary {
    fn from(record: WordRecord) -> Self {
        Self {
            id: record.id,
            word: record.word,
            anglosax: record.anglosax,
            timestamp: iso_timestamp(record.timestamp),
            language: record.language,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    date: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageDateQuery {
    language: String,
    date: String,
}

pub async fn list_words(
    State(state): State<AppState>,
) -> Result<Json<Vec<WordResponse>>, AppError> {
    let records = words::list_words(state.db().pool()).await?;
    Ok(Json(records.into_iter().map(WordResponse::from).collect()))
}

pub async fn create_word(
    State(state): State<AppState>,
    Json(request): Json<CreateWordRequest>,
) -> Result<Json<CreateWordResponse>, AppError> {
    let entry = NewWord {
        word: request.word,
        translation: request.translation,
        anglosax: request.anglosax,
        picture: request.picture,
        language: request.language,
        timestamp: request.timestamp.unwrap_or_else(Utc::now),
    };

    let id = words::insert_word(state.db().pool(), &entry).await?;
    tracing::debug!(id, word = %entry.word, "word created");

    Ok(Json(CreateWordResponse { success: true, id }))
}

pub async fn words_for_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<WordResponse>>, AppError> {
    let (start, end) = day_bounds(parse_date(&query.date)?);
    let records =
        words::words_between(state.db().pool(), start, end, Some(DAILY_WORD_LIMIT)).await?;
    Ok(Json(records.into_iter().map(WordResponse::from).collect()))
}

pub async fn words_of_the_day(
    State(state): State<AppState>,
) -> Result<Json<Vec<WordSummary>>, AppError> {
    let (start, end) = day_bounds(Utc::now().date_naive());
    let records = words::words_between(state.db().pool(), start, end, None).await?;
    Ok(Json(records.into_iter().map(WordSummary::from).collect()))
}

pub async fn words_by_language(
    State(state): State<AppState>,
    Query(query): Query<LanguageDateQuery>,
) -> Result<Json<Vec<WordResponse>>, AppError> {
    let (start, end) = day_bounds(parse_date(&query.date)?);
    let records = words::words_by_language_between(
        state.db().pool(),
        &query.language,
        start,
        end,
        DAILY_WORD_LIMIT,
    )
    .await?;
    Ok(Json(records.into_iter().map(WordResponse::from).collect()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD."))
}

/// Inclusive UTC bounds of a calendar day, `00:00:00.000000` through
/// `23:59:59.999999`. Anchored to UTC regardless of caller timezone so the
/// daily word set is the same for every client.
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end_time =
        NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("static end-of-day time");
    let end = date.and_time(end_time).and_utc();
    (start, end)
}

fn iso_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    // Offset-less timestamps are taken as UTC, matching how the store has
    // always interpreted them.
    chrono::NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| serde::de::Error::custom("invalid timestamp, expected ISO-8601"))
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn rejects_slash_separated_date() {
        assert!(parse_date("2024/06/07").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_date("2024-06-07x").is_err());
    }

    #[test]
    fn accepts_plain_date() {
        let date = parse_date("2024-06-07").expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 7).expect("ymd"));
    }

    #[test]
    fn naive_create_timestamp_is_taken_as_utc() {
        let value = serde_json::json!({
            "word": "hello",
            "translation": "你好",
            "timestamp": "2024-06-07T10:00:00"
        });
        let request: CreateWordRequest = serde_json::from_value(value).expect("deserializes");
        let timestamp = request.timestamp.expect("timestamp present");
        assert_eq!(timestamp.hour(), 10);
        assert_eq!(timestamp.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 7).expect("ymd"));
    }

    proptest! {
        #[test]
        fn day_bounds_cover_every_second_of_the_day(seconds in 0u32..86_400) {
            let date = NaiveDate::from_ymd_opt(2024, 6, 7).expect("ymd");
            let (start, end) = day_bounds(date);
            let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).expect("time");
            let instant = date.and_time(time).and_utc();
            prop_assert!(instant >= start);
            prop_assert!(instant <= end);
        }

        #[test]
        fn day_bounds_exclude_neighboring_days(seconds in 0u32..86_400) {
            let date = NaiveDate::from_ymd_opt(2024, 6, 7).expect("ymd");
            let (start, end) = day_bounds(date);
            let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).expect("time");
            let day_before = date.pred_opt().expect("pred").and_time(time).and_utc();
            let day_after = date.succ_opt().expect("succ").and_time(time).and_utc();
            prop_assert!(day_before < start);
            prop_assert!(day_after > end);
        }
    }
}
