//! Results renderer: a pure projection of a [`ResultPayload`] into a view,
//! plus terminal and JSON renderings of that view.

pub mod video;

use console::style;
use serde::Serialize;

use crate::models::ResultPayload;

pub use video::{embed_url, extract_video_id};

/// Skill lists show at most this many entries each.
pub const MAX_SKILLS_SHOWN: usize = 10;

const GAUGE_WIDTH: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// View model
// ────────────────────────────────────────────────────────────────────────────

/// Colour band of a score gauge. Assumes scores in 0 – 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Green,
    Amber,
    Red,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Green
        } else if score >= 40.0 {
            ScoreBand::Amber
        } else {
            ScoreBand::Red
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ScoreBand::Green => "#10B981",
            ScoreBand::Amber => "#F59E0B",
            ScoreBand::Red => "#EF4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub label: &'static str,
    pub score: f64,
    pub band: ScoreBand,
    /// Hex colour of the band, e.g. `#10B981`.
    pub color: &'static str,
}

impl Gauge {
    fn new(label: &'static str, score: f64) -> Self {
        let band = ScoreBand::for_score(score);
        Self {
            label,
            score,
            band,
            color: band.hex(),
        }
    }
}

/// One recommended video. `Embedded` when an id could be resolved from the
/// link, otherwise a placeholder that only links out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoCard {
    Embedded {
        title: String,
        video_id: String,
        embed_url: String,
        watch_url: String,
    },
    Placeholder {
        title: String,
        watch_url: String,
    },
}

impl VideoCard {
    pub fn title(&self) -> &str {
        match self {
            VideoCard::Embedded { title, .. } | VideoCard::Placeholder { title, .. } => title,
        }
    }

    pub fn watch_url(&self) -> &str {
        match self {
            VideoCard::Embedded { watch_url, .. } | VideoCard::Placeholder { watch_url, .. } => {
                watch_url
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub gauges: [Gauge; 3],
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub videos: Vec<VideoCard>,
    pub suggestions: Vec<String>,
}

impl ResultsView {
    pub fn from_payload(payload: &ResultPayload) -> Self {
        let videos = payload
            .interview_videos
            .iter()
            .map(|video| match extract_video_id(&video.url) {
                Some(video_id) => VideoCard::Embedded {
                    title: video.title.clone(),
                    embed_url: embed_url(&video_id),
                    video_id,
                    watch_url: video.url.clone(),
                },
                None => VideoCard::Placeholder {
                    title: video.title.clone(),
                    watch_url: video.url.clone(),
                },
            })
            .collect();

        Self {
            gauges: [
                Gauge::new("Overall Score", payload.score),
                Gauge::new("Similarity", payload.similarity_score),
                Gauge::new("Skill Match", payload.skill_match),
            ],
            matched_skills: first_skills(&payload.matched_skills),
            missing_skills: first_skills(&payload.missing_skills),
            videos,
            suggestions: payload.suggestions.clone(),
        }
    }
}

fn first_skills(skills: &[String]) -> Vec<String> {
    skills.iter().take(MAX_SKILLS_SHOWN).cloned().collect()
}

/// The score exactly as received: `85` → `85%`, `69.96` → `69.96%`.
///
/// Never rounded, so the label cannot disagree with the gauge colour.
pub fn format_score(score: f64) -> String {
    format!("{score}%")
}

// ────────────────────────────────────────────────────────────────────────────
// Renderings
// ────────────────────────────────────────────────────────────────────────────

pub fn render_json(view: &ResultsView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

pub fn render_text(view: &ResultsView) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", style("ATS Analysis Results").bold()));

    for gauge in &view.gauges {
        out.push_str(&format!(
            "  {:<14} {} {}\n",
            gauge.label,
            paint(gauge.band, &gauge_bar(gauge.score)),
            paint(gauge.band, &format_score(gauge.score)),
        ));
    }

    out.push_str(&format!("\n{}\n", style("Matched Skills").green().bold()));
    push_list(&mut out, &view.matched_skills, &style("✓").green().to_string());

    out.push_str(&format!("\n{}\n", style("Missing Skills").red().bold()));
    push_list(&mut out, &view.missing_skills, &style("✗").red().to_string());

    out.push_str(&format!(
        "\n{}\n",
        style("Recommended Interview Preparation Videos").bold()
    ));
    if view.videos.is_empty() {
        out.push_str("  (none)\n");
    }
    for card in &view.videos {
        match card {
            VideoCard::Embedded { embed_url, .. } => {
                out.push_str(&format!("  {} {}\n", style("▶").cyan(), card.title()));
                out.push_str(&format!("      player: {embed_url}\n"));
            }
            VideoCard::Placeholder { .. } => {
                out.push_str(&format!("  {} {}\n", style("□").dim(), card.title()));
            }
        }
        out.push_str(&format!("      Watch on YouTube: {}\n", card.watch_url()));
    }

    out.push_str(&format!("\n{}\n", style("Improvement Suggestions").bold()));
    push_list(&mut out, &view.suggestions, &style("→").cyan().to_string());

    out
}

pub fn render_error(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), style(message).red())
}

fn push_list(out: &mut String, items: &[String], bullet: &str) {
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str(&format!("  {bullet} {item}\n"));
    }
}

fn gauge_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

fn paint(band: ScoreBand, text: &str) -> String {
    match band {
        ScoreBand::Green => style(text).green().to_string(),
        ScoreBand::Amber => style(text).yellow().to_string(),
        ScoreBand::Red => style(text).red().to_string(),
    }
}
