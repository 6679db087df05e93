//! One submission, start to finish: parse, fetch, classify, rank, present.

use anyhow::Result;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::charts::SentimentCounts;
use crate::config::Config;
use crate::rank::top_comments;
use crate::report::{charts_for, Notice, Report};
use crate::sentiment::{classify, PolarityScorer};
use crate::video::parse_video_id;
use crate::youtube::fetch_comments;

/// Run the whole analysis for the URL a user submitted.
///
/// Only an unusable URL is an error here. A failed fetch still produces a
/// report built from the comments collected before the failure, with the
/// failure recorded in `fetch_failure` and in the notices.
pub async fn analyze<S>(
    http: &reqwest::Client,
    config: &Config,
    scorer: &S,
    raw_url: &str,
) -> Result<Report>
where
    S: PolarityScorer + Sync + ?Sized,
{
    let video = parse_video_id(raw_url)?;
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %run_id, video = %video);

    async move {
        let mut notices = vec![Notice::info("Fetching comments...")];
        let fetched = fetch_comments(http, config, &video).await;
        if let Some(failure) = &fetched.failure {
            notices.push(Notice::error(failure.clone()));
        }

        notices.push(Notice::info("Analyzing sentiments..."));
        let classified = classify(scorer, fetched.comments);
        let counts = SentimentCounts::from_classified(&classified);
        let top = top_comments(&classified.polar(), config.top_n);
        let (pie_chart_svg, bar_chart_svg) = charts_for(&counts);

        info!(
            "📊 [Analyze] positive={} negative={} neutral={} partial={}",
            counts.positive,
            counts.negative,
            counts.neutral,
            fetched.failure.is_some()
        );

        Ok(Report {
            run_id: run_id.to_string(),
            video_id: video.to_string(),
            video_url: video.watch_url(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            notices,
            fetch_failure: fetched.failure,
            requests: fetched.requests,
            counts,
            top_n: config.top_n,
            top,
            pie_chart_svg,
            bar_chart_svg,
        })
    }
    .instrument(span)
    .await
}
