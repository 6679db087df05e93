//! SVG pie and bar charts of the sentiment breakdown.
//!
//! Both charts use the fixed category order Positive, Negative, Neutral and
//! the same three-color palette. Output is a standalone `<svg>` element that
//! can be inlined into the results page or returned through the JSON API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::sentiment::{Classified, SentimentBucket};

/// Fill colors in category order.
pub const PALETTE: [&str; 3] = ["#FFB6C1", "#FF69B4", "#D8BFD8"];

pub const PIE_TITLE: &str = "Sentiment Distribution";
pub const BAR_TITLE: &str = "Sentiment Count Bar Graph";
pub const BAR_Y_LABEL: &str = "Comment Count";

/// Pie wedges start here, measured counter-clockwise from 3 o'clock.
const PIE_START_ANGLE: f64 = 140.0;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn from_classified(classified: &Classified) -> Self {
        Self {
            positive: classified.count(SentimentBucket::Positive),
            negative: classified.count(SentimentBucket::Negative),
            neutral: classified.count(SentimentBucket::Neutral),
        }
    }

    pub fn get(&self, bucket: SentimentBucket) -> usize {
        match bucket {
            SentimentBucket::Positive => self.positive,
            SentimentBucket::Negative => self.negative,
            SentimentBucket::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

pub fn bucket_color(bucket: SentimentBucket) -> &'static str {
    match bucket {
        SentimentBucket::Positive => PALETTE[0],
        SentimentBucket::Negative => PALETTE[1],
        SentimentBucket::Neutral => PALETTE[2],
    }
}

/// Same output as printf's `%1.1f%%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn svg_open(title: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{title}" font-family="sans-serif"><rect width="{w}" height="{h}" fill="#ffffff"/><text x="{cx}" y="30" text-anchor="middle" font-size="18">{title}</text>"##,
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        title = title
    )
}

/// Point on a circle; `degrees` counter-clockwise from 3 o'clock.
fn polar_point(cx: f64, cy: f64, r: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (cx + r * radians.cos(), cy - r * radians.sin())
}

fn anchor_for(degrees: f64) -> &'static str {
    let cos = degrees.to_radians().cos();
    if cos > 0.1 {
        "start"
    } else if cos < -0.1 {
        "end"
    } else {
        "middle"
    }
}

pub fn pie_chart_svg(counts: &SentimentCounts) -> String {
    let (cx, cy, r) = (WIDTH / 2.0, 215.0, 140.0);
    let mut svg = svg_open(PIE_TITLE);
    let total = counts.total();

    if total == 0 {
        svg.push_str(&format!(
            r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="#cccccc" stroke-dasharray="6 4"/><text x="{cx}" y="{cy}" text-anchor="middle" font-size="14" fill="#666666">No comments to chart</text></svg>"##,
        ));
        return svg;
    }

    let mut angle = PIE_START_ANGLE;
    for bucket in SentimentBucket::ALL {
        let count = counts.get(bucket);
        if count == 0 {
            continue;
        }
        let fraction = count as f64 / total as f64;
        let sweep = fraction * 360.0;
        let color = bucket_color(bucket);

        if count == total {
            svg.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{color}"/>"#
            ));
        } else {
            let (x0, y0) = polar_point(cx, cy, r, angle);
            let (x1, y1) = polar_point(cx, cy, r, angle + sweep);
            let large_arc = if sweep > 180.0 { 1 } else { 0 };
            // sweep-flag 0: counter-clockwise on screen
            svg.push_str(&format!(
                r#"<path d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x1:.2} {y1:.2} Z" fill="{color}"/>"#
            ));
        }

        let mid = angle + sweep / 2.0;
        let (lx, ly) = polar_point(cx, cy, r * 1.1, mid);
        let (px, py) = polar_point(cx, cy, r * 0.6, mid);
        svg.push_str(&format!(
            r#"<text x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}" dominant-baseline="middle" font-size="14">{label}</text><text x="{px:.2}" y="{py:.2}" text-anchor="middle" dominant-baseline="middle" font-size="13">{pct}</text>"#,
            anchor = anchor_for(mid),
            label = bucket.label(),
            pct = format_percent(fraction),
        ));

        angle += sweep;
    }

    svg.push_str("</svg>");
    svg
}

/// Smallest of 1, 2, 5 x 10^k that is at least `raw`; never below 1.
fn nice_step(raw: f64) -> f64 {
    if raw <= 1.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

pub fn bar_chart_svg(counts: &SentimentCounts) -> String {
    let (left, right, top, bottom) = (70.0, WIDTH - 30.0, 55.0, HEIGHT - 50.0);
    let plot_width = right - left;
    let plot_height = bottom - top;

    let max = SentimentBucket::ALL
        .iter()
        .map(|b| counts.get(*b))
        .max()
        .unwrap_or(0) as f64;
    let step = nice_step(max / 5.0);
    let y_max = ((max / step).ceil() * step).max(step);

    let mut svg = svg_open(BAR_TITLE);

    // y axis, ticks and grid
    let mut tick = 0.0;
    while tick <= y_max + f64::EPSILON {
        let y = bottom - tick / y_max * plot_height;
        svg.push_str(&format!(
            r##"<line x1="{left}" y1="{y:.2}" x2="{right}" y2="{y:.2}" stroke="#eeeeee"/><text x="{tx}" y="{y:.2}" text-anchor="end" dominant-baseline="middle" font-size="12">{tick}</text>"##,
            tx = left - 6.0,
        ));
        tick += step;
    }
    svg.push_str(&format!(
        r##"<line x1="{left}" y1="{top}" x2="{left}" y2="{bottom}" stroke="#333333"/><line x1="{left}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="#333333"/>"##
    ));
    svg.push_str(&format!(
        r#"<text x="18" y="{my}" transform="rotate(-90 18 {my})" text-anchor="middle" font-size="13">{BAR_Y_LABEL}</text>"#,
        my = top + plot_height / 2.0,
    ));

    let band = plot_width / SentimentBucket::ALL.len() as f64;
    for (i, bucket) in SentimentBucket::ALL.into_iter().enumerate() {
        let count = counts.get(bucket);
        let height = count as f64 / y_max * plot_height;
        let bar_width = band * 0.8;
        let x = left + band * i as f64 + (band - bar_width) / 2.0;
        let y = bottom - height;
        let center = x + bar_width / 2.0;
        svg.push_str(&format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{bar_width:.2}" height="{height:.2}" fill="{color}"/><text x="{center:.2}" y="{ly:.2}" text-anchor="middle" font-size="12">{count}</text><text x="{center:.2}" y="{xy:.2}" text-anchor="middle" font-size="13">{label}</text>"#,
            color = bucket_color(bucket),
            ly = y - 6.0,
            xy = bottom + 20.0,
            label = bucket.label(),
        ));
    }

    svg.push_str("</svg>");
    svg
}
