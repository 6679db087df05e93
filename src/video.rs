//! Video identifier extraction from watch URLs.

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use std::fmt;

/// Identifier taken from the `v` query parameter of a watch URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL, used for the "source" link on the results page.
    pub fn watch_url(&self) -> String {
        format!(
            "https://www.youtube.com/watch?v={}",
            urlencoding::encode(&self.0)
        )
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a YouTube watch URL and return its `v` parameter.
///
/// Accepts anything `Url` can parse, e.g.
/// - `https://www.youtube.com/watch?v=ABC123`
/// - `https://youtube.com/watch?feature=share&v=ABC123&t=42`
///
/// Fails when the input is not an absolute URL or has no non-empty `v`.
pub fn parse_video_id(input: &str) -> Result<VideoId> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).with_context(|| format!("not a valid URL: {:?}", trimmed))?;

    let id = url
        .query_pairs()
        .find(|(key, value)| key == "v" && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
        .ok_or_else(|| anyhow!("URL has no 'v' parameter: {}", trimmed))?;

    Ok(VideoId(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_v_param() {
        let id = parse_video_id("https://www.youtube.com/watch?v=ABC123").unwrap();
        assert_eq!(id.as_str(), "ABC123");
    }

    #[test]
    fn test_v_param_among_others() {
        let id = parse_video_id("https://youtube.com/watch?feature=share&v=ABC123&t=42s").unwrap();
        assert_eq!(id.as_str(), "ABC123");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let id = parse_video_id("  https://www.youtube.com/watch?v=dQw4w9WgXcQ \n").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_missing_v_fails() {
        assert!(parse_video_id("https://www.youtube.com/playlist?list=PLrAXtmRdnEQy").is_err());
        assert!(parse_video_id("https://youtu.be/dQw4w9WgXcQ").is_err());
    }

    #[test]
    fn test_empty_v_fails() {
        assert!(parse_video_id("https://www.youtube.com/watch?v=").is_err());
    }

    #[test]
    fn test_not_a_url_fails() {
        assert!(parse_video_id("definitely not a url").is_err());
        assert!(parse_video_id("").is_err());
    }

    #[test]
    fn test_watch_url_roundtrips_through_parser() {
        let id = parse_video_id("https://www.youtube.com/watch?v=a-b_c").unwrap();
        assert_eq!(parse_video_id(&id.watch_url()).unwrap(), id);
    }
}
