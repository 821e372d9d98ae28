//! # Audience Trust Model
//!
//! Scores engagement quality and purchase intent from comment texts and
//! platform metrics. Comment sentiment runs over a fixed word lexicon;
//! purchase intent over a fixed phrase list.
//!
//! - Lexicons ship as a built-in seed (`TrustLexicon::default_seed`).
//! - A JSON file can override them; resolution order: explicit path →
//!   `ACCS_TRUST_LEXICON_PATH` → seed. Malformed files fall back to the
//!   seed rather than failing a scoring pass.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::{fs, path::Path};

use crate::inputs::EngagementMetrics;
use crate::score::{AudienceTrustReport, Grade, TrustLevel};

pub const ENV_TRUST_LEXICON_PATH: &str = "ACCS_TRUST_LEXICON_PATH";

const BASELINE: i32 = 50;

const POLARITY_POSITIVE_MIN: f64 = 0.3;
const POLARITY_NEGATIVE_MAX: f64 = -0.3;
const QUESTION_DENSITY_MIN: f64 = 0.2;
const INTENT_BONUS_CAP: i32 = 15;
const SAVE_RATIO_HIGH: f64 = 0.05;
const SAVE_RATIO_LOW: f64 = 0.01;
const REPLY_PROXY_MIN: f64 = 0.25;
const EMOJI_RATIO_MAX: f64 = 0.1;

/// Process-wide lexicon, resolved once from the environment.
static LEXICON: Lazy<TrustLexicon> = Lazy::new(TrustLexicon::load_default);

/// Word/phrase tables driving the sentiment and purchase-intent signals.
#[derive(Debug, Clone, Deserialize)]
pub struct TrustLexicon {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    /// Phrases matched as lowercase substrings of a comment.
    #[serde(default)]
    pub purchase_intent: Vec<String>,
}

impl TrustLexicon {
    /// Resolve from `ACCS_TRUST_LEXICON_PATH` if set, else the seed.
    pub fn load_default() -> Self {
        match std::env::var(ENV_TRUST_LEXICON_PATH) {
            Ok(path) => Self::load_from_file(path),
            Err(_) => Self::default_seed(),
        }
    }

    /// Load from a JSON file. Falls back to `default_seed()` on error;
    /// a broken override must not take scoring down.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(target: "accs", error = %e, "trust lexicon unparsable, using seed");
                Self::default_seed()
            }),
            Err(_) => Self::default_seed(),
        }
    }

    /// Built-in lexicon. This is the fixed table the score semantics pin;
    /// file overrides exist for experimentation, not for runtime tuning.
    pub fn default_seed() -> Self {
        let positive = [
            "love", "amazing", "great", "awesome", "perfect", "best", "beautiful", "obsessed",
            "incredible", "favorite", "stunning", "works", "recommend", "good", "cute", "need",
            "yes", "wow",
        ];
        let negative = [
            "scam", "fake", "bad", "hate", "awful", "terrible", "waste", "overpriced",
            "annoying", "worst", "cringe", "boring", "spam", "shill", "ad", "sponsored",
            "meh", "skip",
        ];
        let purchase_intent = [
            "where to buy",
            "link",
            "price",
            "purchase",
            "checkout",
            "add to cart",
            "available",
            "stock",
        ];

        Self {
            positive: positive.iter().map(|s| s.to_string()).collect(),
            negative: negative.iter().map(|s| s.to_string()).collect(),
            purchase_intent: purchase_intent.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Score with the process-wide lexicon.
pub fn evaluate(metrics: Option<&EngagementMetrics>) -> AudienceTrustReport {
    evaluate_with_lexicon(metrics, &LEXICON)
}

/// Score with an explicit lexicon (tests, calibration runs).
pub fn evaluate_with_lexicon(
    metrics: Option<&EngagementMetrics>,
    lexicon: &TrustLexicon,
) -> AudienceTrustReport {
    let mut score = BASELINE;

    let comments: &[String] = metrics.map(|m| m.comment_texts.as_slice()).unwrap_or(&[]);

    // 1) Sentiment polarity over the sampled comments.
    let polarity = sentiment_polarity(comments, lexicon);
    if polarity > POLARITY_POSITIVE_MIN {
        score += 15;
    } else if polarity < POLARITY_NEGATIVE_MAX {
        score -= 20;
    }

    // 2) Question density: buyers ask.
    let question_density = if comments.is_empty() {
        0.0
    } else {
        let with_question = comments.iter().filter(|c| c.contains('?')).count();
        with_question as f64 / comments.len().max(1) as f64
    };
    if question_density > QUESTION_DENSITY_MIN {
        score += 12;
    }

    // 3) Purchase-intent phrases; a comment counts once.
    let intent_comments = comments
        .iter()
        .filter(|c| {
            let lc = c.to_lowercase();
            lexicon.purchase_intent.iter().any(|kw| lc.contains(kw.as_str()))
        })
        .count();
    score += INTENT_BONUS_CAP.min(intent_comments as i32 * 3);

    // 4) Save ratio. Skipped entirely without a view count: an unknown
    //    denominator must not read as "nobody saves this".
    let save_ratio = match metrics {
        Some(m) => match m.views {
            Some(views) if views > 0 => Some(m.saves.unwrap_or(0) as f64 / views as f64),
            _ => None,
        },
        None => None,
    };
    if let Some(ratio) = save_ratio {
        if ratio > SAVE_RATIO_HIGH {
            score += 10;
        } else if ratio < SAVE_RATIO_LOW {
            score -= 5;
        }
    }

    // 5) Reply-depth proxy: the platform count when present, else the
    //    sample size. Thread data is not part of the contract.
    let comment_count = metrics
        .map(|m| m.comments.unwrap_or(m.comment_texts.len() as u64))
        .unwrap_or(0);
    let reply_proxy = if comment_count > 10 { 0.3 } else { 0.1 };
    if reply_proxy > REPLY_PROXY_MIN {
        score += 8;
    }

    // 6) Emoji walls read as low-effort engagement.
    let total_chars: usize = comments.iter().map(|c| c.chars().count()).sum();
    if total_chars > 0 {
        let emoji_count: usize = comments
            .iter()
            .map(|c| c.chars().filter(|ch| is_emoji(*ch)).count())
            .sum();
        if emoji_count as f64 / total_chars as f64 > EMOJI_RATIO_MAX {
            score -= 5;
        }
    }

    let score = score.clamp(0, 100) as u32;

    let purchase_intent_confidence = ((intent_comments as f64 * 10.0
        + question_density * 30.0
        + save_ratio.unwrap_or(0.0) * 200.0)
        / 3.0)
        .clamp(0.0, 100.0)
        .round() as u32;

    AudienceTrustReport {
        score,
        level: level_for(score),
        engagement_quality_grade: Grade::from_score(score),
        purchase_intent_confidence,
    }
}

/// (positive hits − negative hits) / total hits over alphanumeric tokens;
/// 0 with no comments or no hits.
fn sentiment_polarity(comments: &[String], lexicon: &TrustLexicon) -> f64 {
    if comments.is_empty() {
        return 0.0;
    }

    let positive: HashSet<&str> = lexicon.positive.iter().map(String::as_str).collect();
    let negative: HashSet<&str> = lexicon.negative.iter().map(String::as_str).collect();

    let mut pos = 0i64;
    let mut neg = 0i64;
    for comment in comments {
        for token in tokenize(comment) {
            if positive.contains(token.as_str()) {
                pos += 1;
            } else if negative.contains(token.as_str()) {
                neg += 1;
            }
        }
    }

    let total = pos + neg;
    if total == 0 {
        return 0.0;
    }
    (pos - neg) as f64 / total as f64
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

/// Common emoji blocks: misc symbols & pictographs through supplemental,
/// regional indicators, dingbats, and the variation selector.
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1FAFF | 0x1F1E6..=0x1F1FF | 0x2600..=0x27BF | 0xFE0F
    )
}

fn level_for(score: u32) -> TrustLevel {
    if score >= 80 {
        TrustLevel::VeryHigh
    } else if score >= 65 {
        TrustLevel::High
    } else if score >= 45 {
        TrustLevel::Medium
    } else {
        TrustLevel::Low
    }
}
