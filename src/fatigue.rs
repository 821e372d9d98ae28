//! # Fatigue Risk Model
//! Estimates creative exhaustion by comparing a content item's structural
//! signature (hook type, visual composition, audio trend) against similar
//! circulating content, the brand's own history, and industry-wide format
//! usage. Risk accumulates per trigger; the sub-score is the inverse.

use std::collections::HashMap;

use crate::inputs::{BrandContent, ContentStructure, SimilarContent};
use crate::score::{FatigueReport, SignalLevel};

const MEAN_SIMILARITY_SEVERE: f64 = 0.8;
const MEAN_SIMILARITY_ELEVATED: f64 = 0.6;
const HOOK_SHARE_MAX: f64 = 0.5;
const VISUAL_SHARE_MAX: f64 = 0.6;
const AUDIO_SHARE_MAX: f64 = 0.7;
const BRAND_REPEAT_MAX: f64 = 0.5;

/// Industry trend counts are normalized by this ceiling before the
/// threshold check.
const TREND_NORMALIZER: f64 = 10_000.0;
const TREND_SATURATED_MIN: f64 = 0.7;

const RISK_HIGH_MIN: u32 = 60;
const RISK_MEDIUM_MIN: u32 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct FatigueSignals<'a> {
    pub structure: Option<&'a ContentStructure>,
    pub similar_content: &'a [SimilarContent],
    pub brand_history: &'a [BrandContent],
    pub industry_trends: Option<&'a HashMap<String, f64>>,
}

pub fn evaluate(sig: &FatigueSignals) -> FatigueReport {
    let mut risk: i32 = 0;
    let mut warnings = Vec::new();

    let similar = sig.similar_content;
    if !similar.is_empty() {
        let n = similar.len() as f64;

        // 1) Raw similarity mass.
        let mean_similarity = similar.iter().map(|s| s.similarity).sum::<f64>() / n;
        if mean_similarity > MEAN_SIMILARITY_SEVERE {
            risk += 30;
            warnings.push("Nearly identical content is already circulating".to_string());
        } else if mean_similarity > MEAN_SIMILARITY_ELEVATED {
            risk += 15;
            warnings.push("Very similar content is already circulating".to_string());
        }

        // 2) Structural element shares among the similar set.
        if let Some(structure) = sig.structure {
            if let Some(hook) = structure.hook_type.as_deref() {
                let share = share_matching(similar, |s| s.hook_type.as_deref() == Some(hook));
                if share > HOOK_SHARE_MAX {
                    warnings.push(format!("Hook type \"{hook}\" is heavily used right now"));
                    risk += 20;
                }
            }
            if let Some(visual) = structure.visual_composition.as_deref() {
                let share =
                    share_matching(similar, |s| s.visual_composition.as_deref() == Some(visual));
                if share > VISUAL_SHARE_MAX {
                    warnings.push(format!(
                        "Visual composition \"{visual}\" dominates similar content"
                    ));
                    risk += 15;
                }
            }
            if let Some(audio) = structure.audio_trend.as_deref() {
                let share = share_matching(similar, |s| s.audio_trend.as_deref() == Some(audio));
                if share > AUDIO_SHARE_MAX {
                    warnings.push(format!("Audio trend \"{audio}\" is near saturation"));
                    risk += 10;
                }
            }
        }
    }

    // 3) The brand has already run this exact format.
    if let Some(structure) = sig.structure {
        if let (Some(hook), Some(visual), false) = (
            structure.hook_type.as_deref(),
            structure.visual_composition.as_deref(),
            sig.brand_history.is_empty(),
        ) {
            let matching = sig
                .brand_history
                .iter()
                .filter(|b| {
                    b.structure.hook_type.as_deref() == Some(hook)
                        && b.structure.visual_composition.as_deref() == Some(visual)
                })
                .count();
            let share = matching as f64 / sig.brand_history.len() as f64;
            if share > BRAND_REPEAT_MAX {
                risk += 25;
                warnings.push("This brand has already run this hook/visual combination".to_string());
            }
        }

        // 4) Industry-wide saturation of the format pair.
        if let (Some(trends), Some(hook), Some(visual)) = (
            sig.industry_trends,
            structure.hook_type.as_deref(),
            structure.visual_composition.as_deref(),
        ) {
            let key = format!("{hook}_{visual}");
            if let Some(freq) = trends.get(&key) {
                let normalized = (freq / TREND_NORMALIZER).min(1.0);
                if normalized > TREND_SATURATED_MIN {
                    risk += 15;
                    warnings.push(format!("Format \"{key}\" is saturated industry-wide"));
                }
            }
        }
    }

    let risk = risk.clamp(0, 100) as u32;
    let score = 100 - risk;

    FatigueReport {
        score,
        level: level_for(risk),
        originality_percentile: 100 - risk,
        warnings,
    }
}

fn share_matching<F>(similar: &[SimilarContent], pred: F) -> f64
where
    F: Fn(&ContentStructure) -> bool,
{
    let matching = similar.iter().filter(|s| pred(&s.structure)).count();
    matching as f64 / similar.len() as f64
}

fn level_for(risk: u32) -> SignalLevel {
    if risk >= RISK_HIGH_MIN {
        SignalLevel::High
    } else if risk >= RISK_MEDIUM_MIN {
        SignalLevel::Medium
    } else {
        SignalLevel::Low
    }
}
