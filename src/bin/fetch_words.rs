use std::process::ExitCode;

use chrono::Utc;
use serde_json::Value;

/// Client for the downstream voice agent: fetches today's words from the
/// running API and drops the image payloads before printing.
#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let api_url = std::env::var("WORDS_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/words".to_string());
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let client = reqwest::Client::new();
    let response = match client
        .get(&api_url)
        .query(&[("date", today.as_str())])
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            eprintln!("request to {api_url} failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if !response.status().is_success() {
        eprintln!("unexpected status {} from {api_url}", response.status());
        return ExitCode::FAILURE;
    }

    let mut words: Vec<serde_json::Map<String, Value>> = match response.json().await {
        Ok(words) => words,
        Err(err) => {
            eprintln!("failed to decode word list: {err}");
            return ExitCode::FAILURE;
        }
    };

    for word in &mut words {
        word.remove("picture");
    }

    println!("Words for today (no images):");
    for word in &words {
        match serde_json::to_string(word) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("failed to render entry: {err}"),
        }
    }

    ExitCode::SUCCESS
}
