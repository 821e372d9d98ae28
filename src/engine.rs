//! # ACCS Synthesizer
//! Pure, testable logic that maps validated `AccsInputs` → `AccsScore`.
//! No I/O; each call is independent given its inputs, so callers may
//! parallelize freely across items.
//!
//! Policy: the four sub-scores combine under fixed weights. The weights,
//! band width, and thresholds are deliberate policy constants, tunable
//! by edit, not at runtime.

use chrono::Utc;
use tracing::debug;

use crate::authenticity::{self, AuthenticitySignals};
use crate::debug::{anon_hash, dev_log_score};
use crate::error::ScoreError;
use crate::fatigue::{self, FatigueSignals};
use crate::inputs::AccsInputs;
use crate::saturation;
use crate::score::{
    AccsScore, ConfidenceInterval, PerformanceTier, ReasonAttribution, RecommendedUse, SignalLevel,
};
use crate::trust;

/// Sub-score weights. They sum to 1.0 and are not configurable at
/// runtime.
pub const W_AUTHENTICITY: f64 = 0.35;
pub const W_AUDIENCE_TRUST: f64 = 0.30;
pub const W_SATURATION: f64 = 0.20;
pub const W_FATIGUE: f64 = 0.15;

/// Half-width of the confidence band: 1.96 x an assumed stddev of 10.
/// The stddev is a placeholder, not derived from historical variance.
pub const CONFIDENCE_BAND: f64 = 19.6;

const TIER_HIGH_MIN: u32 = 75;
const TIER_MEDIUM_MIN: u32 = 50;

/// Placement thresholds; each unlocked set is cumulative, so a higher
/// score keeps every placement a lower score had.
const USE_THRESHOLDS: [(u32, &[RecommendedUse]); 4] = [
    (70, &[RecommendedUse::PaidSocial, RecommendedUse::Homepage]),
    (60, &[RecommendedUse::Email]),
    (50, &[RecommendedUse::ProductPage]),
    (40, &[RecommendedUse::Retargeting]),
];

// Reason-attribution thresholds, per sub-model.
const STRONG_AUTHENTICITY_MIN: u32 = 70;
const STRONG_TRUST_MIN: u32 = 70;
const LOW_FATIGUE_RISK_MAX: u32 = 30;

/// Compute the composite Authenticity & Conversion Confidence Score.
///
/// Validates the boundary once, then runs the four sub-models over
/// sanitized inputs and synthesizes the weighted result. Missing optional
/// inputs degrade to each model's neutral default; the only error is
/// malformed numeric input.
pub fn compute_accs(inputs: &AccsInputs) -> Result<AccsScore, ScoreError> {
    inputs.validate()?;
    let inputs = inputs.sanitized();
    let scored_at = inputs.scored_at.unwrap_or_else(Utc::now);

    let previous_promotions: &[String] = inputs
        .creator_history
        .as_ref()
        .map(|h| h.previous_promotions.as_slice())
        .unwrap_or(&[]);

    let auth = authenticity::evaluate(&AuthenticitySignals {
        transcript: inputs.transcript.as_deref(),
        caption: inputs.caption.as_deref(),
        previous_promotions,
        brand_mention_timing: inputs.brand_mention_timing,
        hook_text: inputs.hook_text.as_deref(),
        visual_continuity: inputs.visual_continuity,
    });

    let trust = trust::evaluate(inputs.engagement_metrics.as_ref());

    let posts = inputs
        .creator_history
        .as_ref()
        .map(|h| h.promotional_posts.as_slice())
        .unwrap_or(&[]);
    let sat = saturation::evaluate(posts, scored_at);

    let fatigue = fatigue::evaluate(&FatigueSignals {
        structure: inputs.content_structure.as_ref(),
        similar_content: &inputs.similar_content,
        brand_history: &inputs.brand_history,
        industry_trends: inputs.industry_trends.as_ref(),
    });

    // Weighted synthesis over the raw (pre-rounding) sub-scores. The
    // saturation and fatigue axes are inverted: high = safe.
    let saturation_score = sat.inverted_score();
    let fatigue_score = fatigue.score as f64;

    let final_raw = W_AUTHENTICITY * auth.score as f64
        + W_AUDIENCE_TRUST * trust.score as f64
        + W_SATURATION * saturation_score
        + W_FATIGUE * fatigue_score;
    let score = final_raw.round().clamp(0.0, 100.0) as u32;

    let reason_attribution = attribute_reasons(
        auth.score,
        trust.score,
        sat.risk_level,
        100 - fatigue.score,
        &fatigue.warnings,
        final_raw,
        saturation_score,
        fatigue_score,
    );

    debug!(
        target: "accs",
        content_item_id = %inputs.content_item_id,
        score,
        authenticity = auth.score,
        trust = trust.score,
        saturation = saturation_score,
        fatigue = fatigue.score,
        "accs computed"
    );
    dev_log_score(
        &anon_hash(&inputs.content_item_id),
        score,
        auth.score,
        trust.score,
        saturation_score,
        fatigue.score,
    );

    Ok(AccsScore {
        content_item_id: inputs.content_item_id.clone(),
        score,
        authenticity: auth,
        audience_trust: trust,
        promotion_saturation: sat.report(),
        fatigue_risk: fatigue,
        predicted_performance_tier: performance_tier(score),
        recommended_use: recommended_uses(score),
        confidence_interval: confidence_interval(score),
        reason_attribution,
    })
}

/// Tier bands over the rounded final score.
pub fn performance_tier(score: u32) -> PerformanceTier {
    if score >= TIER_HIGH_MIN {
        PerformanceTier::High
    } else if score >= TIER_MEDIUM_MIN {
        PerformanceTier::Medium
    } else {
        PerformanceTier::Low
    }
}

/// Cumulative placement recommendations for a final score.
pub fn recommended_uses(score: u32) -> Vec<RecommendedUse> {
    let mut uses = Vec::new();
    for (threshold, unlocked) in USE_THRESHOLDS {
        if score >= threshold {
            uses.extend_from_slice(unlocked);
        }
    }
    uses
}

/// Fixed ±[`CONFIDENCE_BAND`] around the score, clipped to [0,100].
pub fn confidence_interval(score: u32) -> ConfidenceInterval {
    let score = score as f64;
    ConfidenceInterval {
        lower: (score - CONFIDENCE_BAND).max(0.0),
        upper: (score + CONFIDENCE_BAND).min(100.0),
    }
}

#[allow(clippy::too_many_arguments)]
fn attribute_reasons(
    authenticity: u32,
    trust: u32,
    saturation_risk: SignalLevel,
    fatigue_risk: u32,
    fatigue_warnings: &[String],
    final_raw: f64,
    saturation_score: f64,
    fatigue_score: f64,
) -> ReasonAttribution {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if authenticity >= STRONG_AUTHENTICITY_MIN {
        strengths.push(format!(
            "Delivery reads as genuine (authenticity {authenticity})"
        ));
    } else {
        weaknesses.push(format!(
            "Delivery reads as scripted or recycled (authenticity {authenticity})"
        ));
    }

    if trust >= STRONG_TRUST_MIN {
        strengths.push(format!(
            "Comment section shows real purchase interest (trust {trust})"
        ));
    } else {
        weaknesses.push(format!(
            "Weak engagement quality or purchase intent (trust {trust})"
        ));
    }

    if saturation_risk == SignalLevel::Low {
        strengths.push("Creator is not currently over-promoting".to_string());
    } else {
        weaknesses.push(format!(
            "Heavy recent promotion cadence (saturation risk {})",
            match saturation_risk {
                SignalLevel::Low => "low",
                SignalLevel::Medium => "medium",
                SignalLevel::High => "high",
            }
        ));
    }

    if fatigue_risk < LOW_FATIGUE_RISK_MAX {
        strengths.push("Creative format still feels fresh".to_string());
    } else {
        weaknesses.push(format!(
            "Creative format shows fatigue (risk {fatigue_risk})"
        ));
        weaknesses.extend(fatigue_warnings.iter().cloned());
    }

    // ASCII for stable console output.
    let key_factors = vec![
        format!(
            "authenticity {authenticity} x {W_AUTHENTICITY} = {:.1} pts",
            authenticity as f64 * W_AUTHENTICITY
        ),
        format!(
            "audience trust {trust} x {W_AUDIENCE_TRUST} = {:.1} pts",
            trust as f64 * W_AUDIENCE_TRUST
        ),
        format!(
            "saturation {saturation_score:.0} x {W_SATURATION} = {:.1} pts",
            saturation_score * W_SATURATION
        ),
        format!(
            "fatigue {fatigue_score:.0} x {W_FATIGUE} = {:.1} pts",
            fatigue_score * W_FATIGUE
        ),
        format!("weighted total {final_raw:.1}"),
    ];

    ReasonAttribution {
        strengths,
        weaknesses,
        key_factors,
    }
}
