//! YouTube Data API v3 comment fetcher.
//!
//! Walks the `commentThreads` listing page by page (100 per page) and keeps
//! the display text of each top-level comment. A failed page ends the walk
//! early: whatever was collected so far is returned together with a
//! human-readable failure so the caller can still show partial results.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::config::Config;
use crate::video::VideoId;

/// Page size requested from the API (its maximum).
pub const PAGE_SIZE: usize = 100;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadPage {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// Result of one pagination walk.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct FetchOutcome {
    /// Comment texts in API order, at most `max_comments` of them
    pub comments: Vec<String>,
    /// Number of HTTP requests issued
    pub requests: usize,
    /// Set when a page failed; `comments` then holds the partial result
    pub failure: Option<String>,
}

impl FetchOutcome {
    fn fail(mut self, reason: String) -> Self {
        warn!(
            "⚠️ [Fetch] Stopping after {} request(s) with {} comment(s): {}",
            self.requests,
            self.comments.len(),
            reason
        );
        self.failure = Some(format!("Error fetching comments: {}", reason));
        self
    }
}

/// Shared HTTP client for Data API calls.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(config.http_timeout)
        .build()?;
    Ok(client)
}

/// Collect up to `config.max_comments` top-level comments for `video`.
///
/// Never returns an error: network failures, non-success statuses and
/// undecodable bodies end the walk and are reported in
/// [`FetchOutcome::failure`].
pub async fn fetch_comments(
    http: &reqwest::Client,
    config: &Config,
    video: &VideoId,
) -> FetchOutcome {
    let endpoint = format!("{}/commentThreads", config.api_base);
    let page_size = PAGE_SIZE.to_string();
    let mut outcome = FetchOutcome::default();
    let mut page_token: Option<String> = None;

    while outcome.comments.len() < config.max_comments {
        let mut query: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("videoId", video.as_str()),
            ("maxResults", page_size.as_str()),
            ("key", config.api_key.as_str()),
        ];
        if let Some(token) = page_token.as_deref() {
            query.push(("pageToken", token));
        }

        outcome.requests += 1;
        let response = match http.get(&endpoint).query(&query).send().await {
            Ok(response) => response,
            Err(e) => return outcome.fail(format!("request failed: {}", e.without_url())),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = match api_error_message(&body) {
                Some(message) => format!("HTTP {} ({})", status, message),
                None => format!("HTTP {}", status),
            };
            return outcome.fail(reason);
        }

        let page: CommentThreadPage = match response.json().await {
            Ok(page) => page,
            Err(e) => return outcome.fail(format!("unexpected response body: {}", e.without_url())),
        };

        debug!(
            "[Fetch] Page {} for {}: {} item(s), more pages: {}",
            outcome.requests,
            video,
            page.items.len(),
            page.next_page_token.is_some()
        );

        outcome.comments.extend(
            page.items
                .into_iter()
                .map(|item| clean_comment_text(&item.snippet.top_level_comment.snippet.text_display)),
        );

        match page.next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    outcome.comments.truncate(config.max_comments);
    info!(
        "📥 [Fetch] {} comment(s) for {} in {} request(s)",
        outcome.comments.len(),
        video,
        outcome.requests
    );
    outcome
}

/// Pull `error.message` out of a Data API error body, if there is one.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

/// `textDisplay` is HTML-formatted; reduce it to plain text.
pub fn clean_comment_text(display: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(display, " ");
    let fragment = Html::parse_fragment(&with_breaks);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{error_json, numbered_page, page_json, spawn_mock, MockResponse};

    fn config_for(base: &str) -> Config {
        let mut config = Config::new("test-key");
        config.api_base = base.to_string();
        config
    }

    fn video() -> VideoId {
        crate::video::parse_video_id("https://www.youtube.com/watch?v=ABC123").unwrap()
    }

    #[tokio::test]
    async fn test_collects_all_pages_in_order() {
        let mock = spawn_mock(vec![
            MockResponse::ok(numbered_page(0, 100, Some("p2"))),
            MockResponse::ok(numbered_page(100, 100, Some("p3"))),
            MockResponse::ok(numbered_page(200, 37, None)),
        ])
        .await;
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&mock.base), &video()).await;

        assert!(outcome.failure.is_none());
        assert_eq!(outcome.comments.len(), 237);
        assert_eq!(outcome.requests, 3);
        let expected: Vec<String> = (0..237).map(|i| format!("comment {}", i)).collect();
        assert_eq!(outcome.comments, expected);
    }

    #[tokio::test]
    async fn test_stops_when_token_disappears() {
        let mock = spawn_mock(vec![
            MockResponse::ok(numbered_page(0, 100, Some("p2"))),
            MockResponse::ok(numbered_page(100, 100, None)),
            MockResponse::ok(numbered_page(200, 100, Some("never"))),
        ])
        .await;
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&mock.base), &video()).await;

        assert_eq!(outcome.requests, 2);
        assert_eq!(mock.hits(), 2);
        assert_eq!(outcome.comments.len(), 200);
    }

    #[tokio::test]
    async fn test_empty_token_ends_walk() {
        let mock = spawn_mock(vec![
            MockResponse::ok(numbered_page(0, 10, Some(""))),
            MockResponse::ok(numbered_page(10, 10, None)),
        ])
        .await;
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&mock.base), &video()).await;

        assert_eq!(outcome.requests, 1);
        assert_eq!(outcome.comments.len(), 10);
    }

    #[tokio::test]
    async fn test_respects_cap() {
        // Every page claims there is more.
        let pages = (0..10)
            .map(|i| MockResponse::ok(numbered_page(i * 100, 100, Some("more"))))
            .collect();
        let mock = spawn_mock(pages).await;
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&mock.base), &video()).await;
        assert_eq!(outcome.comments.len(), 600);
        assert_eq!(outcome.requests, 6);
        assert!(outcome.failure.is_none());
    }

    #[tokio::test]
    async fn test_truncates_to_custom_cap() {
        let pages = (0..10)
            .map(|i| MockResponse::ok(numbered_page(i * 100, 100, Some("more"))))
            .collect();
        let mock = spawn_mock(pages).await;
        let http = reqwest::Client::new();
        let mut config = config_for(&mock.base);
        config.max_comments = 250;

        let outcome = fetch_comments(&http, &config, &video()).await;
        assert_eq!(outcome.requests, 3);
        assert_eq!(outcome.comments.len(), 250);
        assert_eq!(outcome.comments.last().map(String::as_str), Some("comment 249"));
    }

    #[tokio::test]
    async fn test_error_status_returns_partial_results() {
        let mock = spawn_mock(vec![
            MockResponse::ok(numbered_page(0, 100, Some("p2"))),
            MockResponse::status(403, error_json(403, "The request cannot be completed because you have exceeded your quota.")),
        ])
        .await;
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&mock.base), &video()).await;

        assert_eq!(outcome.requests, 2);
        assert_eq!(outcome.comments.len(), 100);
        let failure = outcome.failure.expect("failure should be reported");
        assert!(failure.contains("403"));
        assert!(failure.contains("exceeded your quota"));
    }

    #[tokio::test]
    async fn test_error_without_json_body() {
        let mock = spawn_mock(vec![MockResponse::status(500, serde_json::json!("boom"))]).await;
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&mock.base), &video()).await;

        assert!(outcome.comments.is_empty());
        assert!(outcome.failure.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_sends_expected_query() {
        let mock = spawn_mock(vec![
            MockResponse::ok(page_json(&["a"], Some("TOKEN-2"))),
            MockResponse::ok(page_json(&["b"], None)),
        ])
        .await;
        let http = reqwest::Client::new();

        fetch_comments(&http, &config_for(&mock.base), &video()).await;

        let seen = mock.queries();
        assert_eq!(seen.len(), 2);
        let first = &seen[0];
        assert_eq!(first.get("part").map(String::as_str), Some("snippet"));
        assert_eq!(first.get("videoId").map(String::as_str), Some("ABC123"));
        assert_eq!(first.get("maxResults").map(String::as_str), Some("100"));
        assert_eq!(first.get("key").map(String::as_str), Some("test-key"));
        assert!(first.get("pageToken").is_none());
        assert_eq!(seen[1].get("pageToken").map(String::as_str), Some("TOKEN-2"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_reported() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let http = reqwest::Client::new();

        let outcome = fetch_comments(&http, &config_for(&format!("http://{}", addr)), &video()).await;

        assert_eq!(outcome.requests, 1);
        assert!(outcome.comments.is_empty());
        assert!(outcome.failure.unwrap().starts_with("Error fetching comments"));
    }

    #[test]
    fn test_clean_comment_text() {
        assert_eq!(
            clean_comment_text("I&#39;m <b>so</b> happy<br>really<br/>truly"),
            "I'm so happy really truly"
        );
        assert_eq!(
            clean_comment_text(r#"<a href="https://www.youtube.com/watch?v=x&amp;t=1">1:00</a> best part"#),
            "1:00 best part"
        );
        assert_eq!(clean_comment_text("plain"), "plain");
    }

    #[test]
    fn test_api_error_message() {
        let body = error_json(403, "quotaExceeded").to_string();
        assert_eq!(api_error_message(&body).as_deref(), Some("quotaExceeded"));
        assert!(api_error_message("<html>oops</html>").is_none());
    }
}
