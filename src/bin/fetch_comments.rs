use anyhow::{Context, Result};
use comment_sentiment::sentiment::classify;
use comment_sentiment::video::parse_video_id;
use comment_sentiment::youtube::{build_http_client, fetch_comments};
use comment_sentiment::{Config, LexiconScorer};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .context("usage: fetch_comments <youtube watch url>")?;

    let config = Config::from_env()?;
    let http = build_http_client(&config)?;
    let video = parse_video_id(&url)?;

    println!("🔎 Fetching comments for {}", video);
    let outcome = fetch_comments(&http, &config, &video).await;
    println!(
        "Fetched {} comment(s) in {} request(s)",
        outcome.comments.len(),
        outcome.requests
    );
    if let Some(failure) = &outcome.failure {
        println!("⚠️ {}", failure);
    }

    for text in outcome.comments.iter().take(5) {
        println!("  - {}", text);
    }

    let classified = classify(&LexiconScorer, outcome.comments);
    println!(
        "Positive: {}  Negative: {}  Neutral: {}",
        classified.positive.len(),
        classified.negative.len(),
        classified.neutral.len()
    );

    Ok(())
}
