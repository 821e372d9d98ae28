//! score.rs — Output value objects for one scoring pass.
//!
//! `AccsScore` is computed fresh on every call and has no identity or
//! mutation path inside the core; persistence/versioning belong to the
//! storage collaborator. Every score field is clamped to [0,100] and
//! rounded to an integer before it lands here.

use serde::{Deserialize, Serialize};

/// Composite result: one bounded score, four sub-reports, tier,
/// recommended placements, confidence band, and reason attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccsScore {
    /// Opaque identifier copied from the inputs.
    pub content_item_id: String,
    /// Overall conversion confidence, 0..=100.
    pub score: u32,
    pub authenticity: AuthenticityReport,
    pub audience_trust: AudienceTrustReport,
    pub promotion_saturation: SaturationReport,
    pub fatigue_risk: FatigueReport,
    pub predicted_performance_tier: PerformanceTier,
    /// Cumulative by score threshold: a higher score never loses a
    /// placement a lower score had.
    pub recommended_use: Vec<RecommendedUse>,
    pub confidence_interval: ConfidenceInterval,
    pub reason_attribution: ReasonAttribution,
}

/// How genuine (vs. scripted) the narration reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityReport {
    pub score: u32,
    pub level: SignalLevel,
    /// Complement of the pre-clamp raw score, then clamped.
    pub script_likelihood: u32,
    pub reused_hook_detected: bool,
    /// Ordered, human-readable trigger explanations.
    pub reasons: Vec<String>,
}

/// Engagement quality and purchase intent from comments/metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceTrustReport {
    pub score: u32,
    pub level: TrustLevel,
    pub engagement_quality_grade: Grade,
    pub purchase_intent_confidence: u32,
}

/// How over-promoted the creator currently is. `score` is inverted:
/// high score = low saturation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaturationReport {
    pub score: u32,
    pub level: SignalLevel,
    /// Promotional density within the lookback window, 0..=100.
    pub density: u32,
    pub risk_level: SignalLevel,
    pub recommended_cooldown_days: u32,
}

/// Creative-exhaustion estimate. `score` is inverted: high score = low
/// fatigue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueReport {
    pub score: u32,
    pub level: SignalLevel,
    pub originality_percentile: u32,
    pub warnings: Vec<String>,
}

/// Shared low/medium/high bucket used by several sub-reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Letter grade for engagement quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedUse {
    PaidSocial,
    Homepage,
    Email,
    ProductPage,
    Retargeting,
}

/// Fixed-width band around the final score, clipped to [0,100].
///
/// The width is a placeholder 1.96 x 10, not derived from input variance
/// or historical accuracy, so `lower <= score <= upper` is an arithmetic
/// consequence of the wide band rather than a statistical guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Explanatory strings only, deliberately not structured data, so the
/// wording can evolve without breaking consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonAttribution {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub key_factors: Vec<String>,
}

impl Grade {
    /// Grade bands over the clamped trust score.
    pub fn from_score(score: u32) -> Self {
        match score {
            80..=u32::MAX => Grade::A,
            65..=79 => Grade::B,
            50..=64 => Grade::C,
            35..=49 => Grade::D,
            _ => Grade::F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_band_edges() {
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(79), Grade::B);
        assert_eq!(Grade::from_score(65), Grade::B);
        assert_eq!(Grade::from_score(64), Grade::C);
        assert_eq!(Grade::from_score(50), Grade::C);
        assert_eq!(Grade::from_score(49), Grade::D);
        assert_eq!(Grade::from_score(35), Grade::D);
        assert_eq!(Grade::from_score(34), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecommendedUse::PaidSocial).unwrap(),
            "\"paid_social\""
        );
        assert_eq!(
            serde_json::to_string(&TrustLevel::VeryHigh).unwrap(),
            "\"very_high\""
        );
        assert_eq!(serde_json::to_string(&Grade::A).unwrap(), "\"A\"");
    }
}
