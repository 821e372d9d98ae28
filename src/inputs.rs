//! # Input Contract
//! Value objects handed to the engine by the upstream collaborators
//! (media pipeline, engagement store, creator store). Everything arrives
//! as plain data; the engine never reaches back into storage.
//!
//! Two boundary steps live here:
//! - `normalize_text`: entity decode, tag strip, quote folding, whitespace
//!   collapse. Sentence punctuation survives because pacing splits on `.!?`.
//! - `validate`: fail-fast checks on the float fields (NaN / out of range).
//!   Counts are `u64`, so negative counts are unrepresentable.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ScoreError;

/// Everything the engine needs to score one content item.
///
/// All signal fields are optional; a missing field degrades to the neutral
/// default of its sub-model rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccsInputs {
    /// Opaque identifier, passed through to the result untouched.
    pub content_item_id: String,
    pub transcript: Option<String>,
    pub caption: Option<String>,
    pub engagement_metrics: Option<EngagementMetrics>,
    pub creator_history: Option<CreatorHistory>,
    pub similar_content: Vec<SimilarContent>,
    pub brand_history: Vec<BrandContent>,
    /// How late into the content the brand is first mentioned, 0..1.
    pub brand_mention_timing: Option<f64>,
    pub hook_text: Option<String>,
    /// Shot-to-shot visual continuity estimate from the media pipeline, 0..1.
    pub visual_continuity: Option<f64>,
    pub content_structure: Option<ContentStructure>,
    /// Industry-wide usage counts keyed by `{hookType}_{visualComposition}`.
    pub industry_trends: Option<HashMap<String, f64>>,
    /// Reference instant for the promotion-saturation window. Defaults to
    /// now; supply it to make scoring a pure function of its inputs.
    pub scored_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
    pub saves: Option<u64>,
    pub views: Option<u64>,
    pub comment_texts: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatorHistory {
    /// Transcripts/captions of the creator's earlier promotional posts.
    pub previous_promotions: Vec<String>,
    /// Known script templates from the creator's history. Reserved; not
    /// consumed by the current models.
    pub script_patterns: Vec<String>,
    pub promotional_posts: Vec<PromotionalPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionalPost {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A similar content item retrieved by the external store, with its
/// precomputed similarity to the item under scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarContent {
    pub id: String,
    #[serde(default)]
    pub structure: ContentStructure,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandContent {
    pub content_id: String,
    #[serde(default)]
    pub structure: ContentStructure,
}

/// Structural signature of a content item's creative format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentStructure {
    pub hook_type: Option<String>,
    pub visual_composition: Option<String>,
    pub audio_trend: Option<String>,
    #[serde(rename = "duration")]
    pub duration_secs: Option<f64>,
}

impl AccsInputs {
    /// Fail-fast boundary validation. Rejects NaN/infinite floats and
    /// values outside their declared ranges; never lets them propagate
    /// into the arithmetic as a silently wrong score.
    pub fn validate(&self) -> Result<(), ScoreError> {
        check_unit_interval("brandMentionTiming", self.brand_mention_timing)?;
        check_unit_interval("visualContinuity", self.visual_continuity)?;

        for (i, item) in self.similar_content.iter().enumerate() {
            let field = format!("similarContent[{i}].similarity");
            if !item.similarity.is_finite() {
                return Err(ScoreError::invalid(field, "must be a finite number"));
            }
            if !(0.0..=1.0).contains(&item.similarity) {
                return Err(ScoreError::invalid(field, "must lie in [0, 1]"));
            }
        }

        if let Some(structure) = &self.content_structure {
            if let Some(d) = structure.duration_secs {
                if !d.is_finite() || d < 0.0 {
                    return Err(ScoreError::invalid(
                        "contentStructure.duration",
                        "must be a finite, non-negative number",
                    ));
                }
            }
        }

        if let Some(trends) = &self.industry_trends {
            for (key, freq) in trends {
                if !freq.is_finite() || *freq < 0.0 {
                    return Err(ScoreError::invalid(
                        format!("industryTrends[{key}]"),
                        "must be a finite, non-negative number",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Copy of the inputs with all boundary text normalized and blank
    /// strings folded to `None`. The models assume this has run.
    pub(crate) fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.transcript = clean_opt(out.transcript.take());
        out.caption = clean_opt(out.caption.take());
        out.hook_text = clean_opt(out.hook_text.take());

        if let Some(metrics) = &mut out.engagement_metrics {
            for text in &mut metrics.comment_texts {
                *text = normalize_text(text);
            }
            metrics.comment_texts.retain(|t| !t.is_empty());
        }
        if let Some(history) = &mut out.creator_history {
            for text in &mut history.previous_promotions {
                *text = normalize_text(text);
            }
            history.previous_promotions.retain(|t| !t.is_empty());
        }

        out
    }
}

fn check_unit_interval(field: &str, value: Option<f64>) -> Result<(), ScoreError> {
    if let Some(v) = value {
        if !v.is_finite() {
            return Err(ScoreError::invalid(field, "must be a finite number"));
        }
        if !(0.0..=1.0).contains(&v) {
            return Err(ScoreError::invalid(field, "must lie in [0, 1]"));
        }
    }
    Ok(())
}

fn clean_opt(text: Option<String>) -> Option<String> {
    text.map(|t| normalize_text(&t)).filter(|t| !t.is_empty())
}

/// Normalize boundary text coming from OCR/transcript/caption extraction.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = RE_TAGS.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace. Sentence punctuation stays put: the pacing
    //    signal splits on `.!?`.
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    out = RE_WS.replace_all(&out, " ").to_string();

    out.trim().to_string()
}
