use chrono::{Duration, TimeZone, Utc};

use crate::db::operations::words::{insert_word, NewWord};
use crate::db::Database;

struct SeedWord {
    word: &'static str,
    translation: &'static str,
    anglosax: &'static str,
    picture: &'static str,
}

// Mandarin sample set with Pinyin in the anglosax column, five minutes apart
// so the per-day ordering is visible out of the box.
#[rustfmt::skip]
const SEED_WORDS: &[SeedWord] = &[
    SeedWord { word: "hello", translation: "你好", anglosax: "Nǐ hǎo", picture: "base64string1" },
    SeedWord { word: "world", translation: "世界", anglosax: "Shì jiè", picture: "base64string2" },
    SeedWord { word: "friend", translation: "朋友", anglosax: "Péng yǒu", picture: "base64string3" },
    SeedWord { word: "love", translation: "爱", anglosax: "Ài", picture: "base64string4" },
    SeedWord { word: "peace", translation: "和平", anglosax: "Hé píng", picture: "base64string5" },
    SeedWord { word: "family", translation: "家庭", anglosax: "Jiā tíng", picture: "base64string6" },
    SeedWord { word: "food", translation: "食物", anglosax: "Shí wù", picture: "base64string7" },
    SeedWord { word: "water", translation: "水", anglosax: "Shuǐ", picture: "base64string8" },
    SeedWord { word: "sun", translation: "太阳", anglosax: "Tài yáng", picture: "base64string9" },
    SeedWord { word: "moon", translation: "月亮", anglosax: "Yuè liàng", picture: "base64string10" },
    SeedWord { word: "star", translation: "星星", anglosax: "Xīng xīng", picture: "base64string11" },
    SeedWord { word: "school", translation: "学校", anglosax: "Xué xiào", picture: "base64string12" },
];

/// Populates the translations table with the Mandarin sample rows. Skips
/// entirely when the table already has data, so re-running is harmless.
pub async fn seed_sample_words(db: &Database) -> Result<u64, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "translations""#)
        .fetch_one(db.pool())
        .await?;

    if existing > 0 {
        tracing::info!(rows = existing, "translations table already populated, skipping seed");
        return Ok(0);
    }

    let base = Utc
        .with_ymd_and_hms(2024, 6, 7, 10, 0, 0)
        .single()
        .expect("static seed timestamp");

    let mut inserted = 0u64;
    for (index, seed) in SEED_WORDS.iter().enumerate() {
        let entry = NewWord {
            word: seed.word.to_string(),
            translation: seed.translation.to_string(),
            anglosax: Some(seed.anglosax.to_string()),
            picture: Some(seed.picture.to_string()),
            language: Some("Mandarin".to_string()),
            timestamp: base + Duration::minutes(5 * index as i64),
        };
        insert_word(db.pool(), &entry).await?;
        inserted += 1;
    }

    tracing::info!(inserted, "seeded sample Mandarin words");
    Ok(inserted)
}
