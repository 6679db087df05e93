//! Picks the most negative and most positive comments.

use serde::Serialize;
use utoipa::ToSchema;

use crate::sentiment::ScoredComment;

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct TopComments {
    /// Lowest polarities, ascending
    pub most_negative: Vec<ScoredComment>,
    /// Highest polarities, ascending
    pub most_positive: Vec<ScoredComment>,
}

/// Sort `comments` ascending by polarity and slice off both ends.
///
/// Ties keep their input order. With fewer than `n` comments both lists are
/// simply shorter, and with fewer than `2 * n` they overlap.
pub fn top_comments(comments: &[ScoredComment], n: usize) -> TopComments {
    let mut sorted = comments.to_vec();
    sorted.sort_by(|a, b| a.polarity.total_cmp(&b.polarity));

    let head = n.min(sorted.len());
    let tail = sorted.len().saturating_sub(n);

    TopComments {
        most_negative: sorted[..head].to_vec(),
        most_positive: sorted[tail..].to_vec(),
    }
}
