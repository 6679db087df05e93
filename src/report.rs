//! Presentation of one analysis run: the JSON report and the HTML page.

use serde::Serialize;
use utoipa::ToSchema;

use crate::charts::{self, SentimentCounts};
use crate::rank::TopComments;
use crate::sentiment::{ScoredComment, SentimentBucket};

pub const PAGE_TITLE: &str = "YouTube Comment Sentiment Analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Status line shown above the results, in the order it happened.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Everything the UI shows for one submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Report {
    pub run_id: String,
    pub video_id: String,
    pub video_url: String,
    /// RFC 3339 timestamp
    pub analyzed_at: String,
    pub notices: Vec<Notice>,
    /// Set when pagination stopped early; results below are partial
    pub fetch_failure: Option<String>,
    pub requests: usize,
    pub counts: SentimentCounts,
    pub top_n: usize,
    pub top: TopComments,
    pub pie_chart_svg: String,
    pub bar_chart_svg: String,
}

/// What the index page is showing.
pub enum PageView<'a> {
    /// Bare input form
    Empty,
    Report { input: &'a str, report: &'a Report },
    Error { input: &'a str, message: &'a str },
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>\n", escape_html(text))
}

fn comment_list(comments: &[ScoredComment]) -> String {
    if comments.is_empty() {
        return "<p class=\"empty\">No comments.</p>\n".to_string();
    }
    let mut html = String::from("<ul class=\"comments\">\n");
    for comment in comments {
        html.push_str(&format!(
            "<li><span class=\"polarity\">{:+.2}</span> {}</li>\n",
            comment.polarity,
            escape_html(&comment.text)
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn render_report(report: &Report) -> String {
    let mut html = String::new();

    for notice in &report.notices {
        let class = match notice.level {
            NoticeLevel::Info => "notice",
            NoticeLevel::Error => "notice error",
        };
        html.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            class,
            escape_html(&notice.message)
        ));
    }

    html.push_str(&format!(
        "<p class=\"source\">Video: <a href=\"{url}\">{url}</a></p>\n",
        url = escape_html(&report.video_url)
    ));

    for bucket in SentimentBucket::ALL {
        html.push_str(&paragraph(&format!(
            "{} comments: {}",
            bucket.label(),
            report.counts.get(bucket)
        )));
    }

    html.push_str(&paragraph(&format!("Top {} Most Positive Comments:", report.top_n)));
    html.push_str(&comment_list(&report.top.most_positive));
    html.push_str(&paragraph(&format!("Top {} Most Negative Comments:", report.top_n)));
    html.push_str(&comment_list(&report.top.most_negative));

    // Chart markup is generated locally and contains no user text.
    html.push_str(&paragraph("Sentiment Distribution (Pie Chart):"));
    html.push_str(&format!("<figure class=\"chart\">{}</figure>\n", report.pie_chart_svg));
    html.push_str(&paragraph("Sentiment Count (Bar Graph):"));
    html.push_str(&format!("<figure class=\"chart\">{}</figure>\n", report.bar_chart_svg));

    html
}

/// Full HTML document for the index route.
pub fn render_page(view: &PageView<'_>) -> String {
    let input = match view {
        PageView::Empty => "",
        PageView::Report { input, .. } | PageView::Error { input, .. } => *input,
    };

    let body = match view {
        PageView::Empty => String::new(),
        PageView::Report { report, .. } => render_report(report),
        PageView::Error { message, .. } => format!(
            "<p class=\"notice error\">An error occurred: {}</p>\n",
            escape_html(message)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main>
<h1>{title}</h1>
<form method="get" action="/">
<label for="url">Enter YouTube URL:</label>
<input id="url" name="url" type="text" value="{input}" autofocus>
</form>
<section id="results">
{body}</section>
</main>
</body>
</html>
"#,
        title = PAGE_TITLE,
        input = escape_html(input),
        body = body,
    )
}

/// Chart markup for a set of counts.
pub fn charts_for(counts: &SentimentCounts) -> (String, String) {
    (charts::pie_chart_svg(counts), charts::bar_chart_svg(counts))
}
