//! YouTube comment sentiment dashboard.
//!
//! Data flows through the modules in this order:
//!
//! - `video` - watch URL to video id
//! - `youtube` - paginated `commentThreads` fetcher
//! - `sentiment` - lexicon polarity scoring and bucketing
//! - `rank` - most negative / most positive comments
//! - `charts`, `report` - SVG charts, JSON report and the HTML page
//!
//! `pipeline::analyze` strings them together for one submission and `api`
//! exposes it over HTTP.

pub mod api;
pub mod charts;
pub mod config;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod sentiment;
pub mod video;
pub mod youtube;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use pipeline::analyze;
pub use report::Report;
pub use sentiment::{LexiconScorer, PolarityScorer, SentimentBucket};
