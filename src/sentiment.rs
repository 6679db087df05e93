//! Lexicon-based sentiment polarity and bucketing.
//!
//! Each comment gets a polarity in [-1.0, 1.0]: the mean of the polarities of
//! the lexicon words it contains, adjusted for intensifiers ("very good"),
//! nearby negations ("not good") and exclamation marks ("good!").
//! Comments without any lexicon word score exactly 0.0 and land in the
//! neutral bucket.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;

/// Negated polarity is flipped and damped by this factor.
const NEGATION_FACTOR: f64 = -0.5;
/// How many preceding words a negation reaches.
const NEGATION_WINDOW: usize = 3;
const EXCLAMATION_FACTOR: f64 = 1.25;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)*|!").unwrap());

// Word polarities, roughly on the scale of the pattern/TextBlob lexicon.
static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        // positive
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("amazing", 0.6),
        ("awesome", 1.0), ("wonderful", 1.0), ("fantastic", 0.4), ("superb", 1.0),
        ("outstanding", 0.5), ("brilliant", 0.9), ("perfect", 1.0), ("best", 1.0),
        ("better", 0.5), ("nice", 0.6), ("beautiful", 0.85), ("lovely", 0.5),
        ("love", 0.5), ("loved", 0.7), ("loving", 0.6), ("like", 0.2), ("liked", 0.4),
        ("enjoy", 0.4), ("enjoyed", 0.5), ("happy", 0.8), ("glad", 0.5), ("fun", 0.3),
        ("funny", 0.25), ("hilarious", 0.5), ("cool", 0.35), ("interesting", 0.5),
        ("helpful", 0.5), ("useful", 0.3), ("informative", 0.5), ("clear", 0.1),
        ("incredible", 0.9), ("impressive", 1.0), ("masterpiece", 0.8), ("legend", 0.5),
        ("legendary", 0.6), ("epic", 0.5), ("thanks", 0.2), ("thank", 0.2), ("wow", 0.1),
        ("cute", 0.5), ("sweet", 0.35), ("favorite", 0.5), ("favourite", 0.5),
        ("recommend", 0.3), ("underrated", 0.4), ("talented", 0.7), ("genius", 0.8),
        ("win", 0.8), ("fresh", 0.3), ("clean", 0.37), ("smart", 0.2), ("true", 0.35),
        ("right", 0.29), ("well", 0.2), ("positive", 0.23), ("pleasant", 0.73),
        ("satisfying", 0.5), ("inspiring", 0.5), ("inspirational", 0.5), ("blessed", 0.5),
        ("glorious", 0.8), ("fabulous", 0.4), ("delightful", 0.9), ("gorgeous", 0.7),
        ("impressed", 0.6), ("learned", 0.3), ("learnt", 0.3), ("helped", 0.4), ("helps", 0.3),
        ("appreciate", 0.4), ("appreciated", 0.4), ("goat", 0.5), ("banger", 0.6),
        ("wholesome", 0.6), ("excited", 0.4), ("exciting", 0.3), ("proud", 0.6),
        // negative
        ("bad", -0.7), ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0),
        ("worst", -1.0), ("worse", -0.4), ("poor", -0.4), ("hate", -0.8), ("hated", -0.9),
        ("boring", -1.0), ("stupid", -0.8), ("dumb", -0.375), ("sad", -0.5),
        ("ugly", -0.7), ("wrong", -0.5), ("disappointing", -0.6), ("disappointed", -0.75),
        ("annoying", -0.8), ("fake", -0.5), ("useless", -0.5), ("waste", -0.2),
        ("trash", -0.6), ("garbage", -0.6), ("cringe", -0.6), ("cringy", -0.6),
        ("lame", -0.5), ("mediocre", -0.3), ("pathetic", -1.0), ("ridiculous", -0.33),
        ("disgusting", -1.0), ("angry", -0.5), ("mad", -0.6), ("scary", -0.5),
        ("painful", -0.7), ("hard", -0.29), ("difficult", -0.5), ("confusing", -0.3),
        ("broken", -0.4), ("misleading", -0.5), ("clickbait", -0.5), ("scam", -0.8),
        ("sick", -0.71), ("evil", -1.0), ("toxic", -0.6), ("unfortunately", -0.5),
        ("sorry", -0.5), ("wtf", -0.5), ("worthless", -0.8), ("weak", -0.375),
        ("slow", -0.3), ("overrated", -0.4), ("unfair", -0.5), ("rude", -0.6),
        ("negative", -0.3), ("fail", -0.5), ("failed", -0.5), ("problem", -0.2),
        ("sucks", -0.6), ("suck", -0.6), ("sucked", -0.6), ("joke", -0.4), ("disliked", -0.6),
        ("dislike", -0.5), ("meh", -0.3), ("lazy", -0.25), ("unwatchable", -0.8),
        ("overhyped", -0.4), ("wasted", -0.2), ("ruined", -0.7),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        ("very", 1.3), ("really", 1.3), ("so", 1.3), ("extremely", 1.5), ("super", 1.5),
        ("incredibly", 1.5), ("absolutely", 1.5), ("totally", 1.4), ("truly", 1.3),
        ("quite", 1.1), ("pretty", 1.1), ("too", 1.2), ("most", 1.4), ("slightly", 0.5),
        ("somewhat", 0.7), ("kinda", 0.7), ("barely", 0.4),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "not", "no", "never", "neither", "nor", "nothing", "none", "nobody", "cannot",
        "cant", "can't", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt",
        "isn't", "isnt", "aren't", "arent", "wasn't", "wasnt", "weren't", "werent",
        "won't", "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt", "couldn't",
        "couldnt", "ain't", "aint", "hardly",
    ]
    .into_iter()
    .collect()
});

/// Anything that can turn text into a polarity in [-1.0, 1.0].
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> f64,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// The bundled English lexicon scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
        let tokens: Vec<&str> = TOKEN.find_iter(&lowered).map(|m| m.as_str()).collect();

        let mut scores = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = LEXICON.get(token) else {
                continue;
            };

            // Look back over the preceding words, skipping '!'.
            let previous: Vec<&str> = tokens[..i]
                .iter()
                .rev()
                .filter(|t| **t != "!")
                .take(NEGATION_WINDOW)
                .copied()
                .collect();

            let mut score = base;
            if let Some(factor) = previous.first().and_then(|w| INTENSIFIERS.get(w)) {
                score *= factor;
            }
            if previous.iter().any(|w| NEGATIONS.contains(w)) {
                score *= NEGATION_FACTOR;
            }
            if tokens.get(i + 1) == Some(&"!") {
                score *= EXCLAMATION_FACTOR;
            }
            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    /// Display order used by every chart and count listing.
    pub const ALL: [SentimentBucket; 3] = [
        SentimentBucket::Positive,
        SentimentBucket::Negative,
        SentimentBucket::Neutral,
    ];

    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentBucket::Positive
        } else if polarity < 0.0 {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::Positive => "Positive",
            SentimentBucket::Negative => "Negative",
            SentimentBucket::Neutral => "Neutral",
        }
    }
}

/// A comment with the polarity computed for it in the current run.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScoredComment {
    pub text: String,
    pub polarity: f64,
}

/// Comments partitioned by the sign of their polarity, input order kept.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Classified {
    pub positive: Vec<ScoredComment>,
    pub negative: Vec<ScoredComment>,
    pub neutral: Vec<ScoredComment>,
}

impl Classified {
    pub fn bucket(&self, bucket: SentimentBucket) -> &[ScoredComment] {
        match bucket {
            SentimentBucket::Positive => &self.positive,
            SentimentBucket::Negative => &self.negative,
            SentimentBucket::Neutral => &self.neutral,
        }
    }

    pub fn count(&self, bucket: SentimentBucket) -> usize {
        self.bucket(bucket).len()
    }

    /// Positive followed by negative comments; the ranking input.
    pub fn polar(&self) -> Vec<ScoredComment> {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .cloned()
            .collect()
    }
}

pub fn classify<S>(scorer: &S, comments: Vec<String>) -> Classified
where
    S: PolarityScorer + ?Sized,
{
    let mut classified = Classified::default();
    for text in comments {
        let polarity = scorer.polarity(&text);
        let scored = ScoredComment { text, polarity };
        match SentimentBucket::from_polarity(polarity) {
            SentimentBucket::Positive => classified.positive.push(scored),
            SentimentBucket::Negative => classified.negative.push(scored),
            SentimentBucket::Neutral => classified.neutral.push(scored),
        }
    }
    classified
}
