use comment_sentiment::api::{self, AppState};
use comment_sentiment::youtube::build_http_client;
use comment_sentiment::{Config, LexiconScorer};
use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let http = build_http_client(&config)?;
    tracing::info!(
        "⚙️ Comment cap {}, top {} per side, API base {}",
        config.max_comments,
        config.top_n,
        config.api_base
    );

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState {
        config,
        http,
        scorer: LexiconScorer,
    });

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
