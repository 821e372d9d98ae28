//! # Authenticity Model
//! Pure logic that maps narration/caption signals → an authenticity
//! sub-score with human-readable reasons. No I/O, suitable for unit tests
//! and offline evaluation.
//!
//! Policy: start from a neutral baseline and apply additive adjustments,
//! one reason string per trigger. Missing signals default to 0.5 and
//! adjust nothing.

use crate::score::{AuthenticityReport, SignalLevel};
use crate::textsig;

const BASELINE: i32 = 50;

/// Signals above/below these bands move the score; the middle band is
/// deliberately inert.
const BAND_HIGH: f64 = 0.7;
const BAND_LOW: f64 = 0.3;

/// Neutral stand-in for a missing 0..1 signal.
const NEUTRAL: f64 = 0.5;

/// Phrase-reuse matches above this count mark the hook as recycled.
const REUSE_TOLERANCE: usize = 3;

const LEVEL_HIGH_MIN: u32 = 70;
const LEVEL_MEDIUM_MIN: u32 = 40;

/// Inputs the model consumes, borrowed from the validated top-level
/// contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticitySignals<'a> {
    pub transcript: Option<&'a str>,
    pub caption: Option<&'a str>,
    pub previous_promotions: &'a [String],
    pub brand_mention_timing: Option<f64>,
    pub hook_text: Option<&'a str>,
    pub visual_continuity: Option<f64>,
}

pub fn evaluate(sig: &AuthenticitySignals) -> AuthenticityReport {
    let mut score = BASELINE;
    let mut reasons = Vec::new();
    let mut reused_hook_detected = false;

    // 1) Lexical entropy of the narration.
    let entropy = sig.transcript.map(textsig::entropy).unwrap_or(NEUTRAL);
    if entropy > BAND_HIGH {
        score += 15;
        reasons.push("Natural, varied speech suggests unscripted delivery".to_string());
    } else if entropy < BAND_LOW {
        score -= 20;
        reasons.push("Low lexical variety suggests a scripted read".to_string());
    }

    // 2) Verbatim phrase reuse across the creator's previous promotions.
    let spoken = combined_text(sig.transcript, sig.caption);
    if !spoken.is_empty() && !sig.previous_promotions.is_empty() {
        let reuse = textsig::phrase_reuse_count(&spoken, sig.previous_promotions);
        if reuse > REUSE_TOLERANCE {
            score -= 15;
            reused_hook_detected = true;
            reasons.push(format!(
                "Recycles wording found in {reuse} previous promotions"
            ));
        }
    }

    // 3) Hook originality (only when a hook was extracted).
    if let Some(hook) = sig.hook_text {
        let originality = textsig::hook_originality(hook, sig.previous_promotions);
        if originality > BAND_HIGH {
            score += 10;
            reasons.push("Opening hook is original for this creator".to_string());
        } else if originality < BAND_LOW {
            score -= 10;
            reasons.push("Opening hook closely mirrors earlier promotions".to_string());
        }
    }

    // 4) Brand-mention timing: late mentions read as organic, instant
    //    mentions as an ad read.
    let timing = sig.brand_mention_timing.unwrap_or(NEUTRAL);
    if timing > BAND_HIGH {
        score += 10;
        reasons.push("Brand mention arrives late, after genuine content".to_string());
    } else if timing < BAND_LOW {
        score -= 15;
        reasons.push("Brand mention lands immediately, ad-first structure".to_string());
    }

    // 5) Sentence pacing variance.
    let pacing = sig.transcript.map(textsig::natural_pacing).unwrap_or(NEUTRAL);
    if pacing > BAND_HIGH {
        score += 8;
        reasons.push("Irregular sentence pacing, consistent with free speech".to_string());
    } else if pacing < BAND_LOW {
        score -= 8;
        reasons.push("Uniform sentence pacing, consistent with a script".to_string());
    }

    // 6) Visual continuity from the media pipeline.
    let continuity = sig.visual_continuity.unwrap_or(NEUTRAL);
    if continuity > BAND_HIGH {
        score += 7;
        reasons.push("Continuous takes rather than heavy cuts".to_string());
    } else if continuity < BAND_LOW {
        score -= 7;
        reasons.push("Heavily cut footage, produced-ad pattern".to_string());
    }

    // Script likelihood is the complement of the raw (pre-clamp) score.
    let script_likelihood = (100 - score).clamp(0, 100) as u32;
    let score = score.clamp(0, 100) as u32;

    AuthenticityReport {
        score,
        level: level_for(score),
        script_likelihood,
        reused_hook_detected,
        reasons,
    }
}

fn level_for(score: u32) -> SignalLevel {
    if score >= LEVEL_HIGH_MIN {
        SignalLevel::High
    } else if score >= LEVEL_MEDIUM_MIN {
        SignalLevel::Medium
    } else {
        SignalLevel::Low
    }
}

fn combined_text(transcript: Option<&str>, caption: Option<&str>) -> String {
    match (transcript, caption) {
        (Some(t), Some(c)) => format!("{t} {c}"),
        (Some(t), None) => t.to_string(),
        (None, Some(c)) => c.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AuthenticitySignals<'static> {
        AuthenticitySignals::default()
    }

    #[test]
    fn no_signals_stays_at_baseline() {
        let report = evaluate(&base());
        assert_eq!(report.score, 50);
        assert_eq!(report.script_likelihood, 50);
        assert_eq!(report.level, SignalLevel::Medium);
        assert!(!report.reused_hook_detected);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn scripted_transcript_is_penalized() {
        let sig = AuthenticitySignals {
            transcript: Some("buy now buy now buy now buy now"),
            ..base()
        };
        let report = evaluate(&sig);
        assert_eq!(report.score, 30);
        assert_eq!(report.level, SignalLevel::Low);
        assert_eq!(report.script_likelihood, 70);
        assert_eq!(report.reasons.len(), 1);
    }

    #[test]
    fn reuse_above_tolerance_sets_flag() {
        let priors: Vec<String> = (0..4)
            .map(|i| format!("promo {i} says this amazing serum works"))
            .collect();
        let sig = AuthenticitySignals {
            transcript: Some("friends keep asking about this amazing serum routine honestly"),
            previous_promotions: &priors,
            ..base()
        };
        let report = evaluate(&sig);
        assert!(report.reused_hook_detected);
    }

    #[test]
    fn reuse_at_tolerance_does_not_trigger() {
        let priors: Vec<String> = (0..3)
            .map(|i| format!("promo {i} says this amazing serum works"))
            .collect();
        let sig = AuthenticitySignals {
            transcript: Some("friends keep asking about this amazing serum routine honestly"),
            previous_promotions: &priors,
            ..base()
        };
        assert!(!evaluate(&sig).reused_hook_detected);
    }

    #[test]
    fn late_brand_mention_rewarded_early_penalized() {
        let late = evaluate(&AuthenticitySignals {
            brand_mention_timing: Some(0.9),
            ..base()
        });
        assert_eq!(late.score, 60);

        let early = evaluate(&AuthenticitySignals {
            brand_mention_timing: Some(0.1),
            ..base()
        });
        assert_eq!(early.score, 35);
    }

    #[test]
    fn script_likelihood_is_preclamp_complement() {
        // Every negative trigger at once pushes the raw score below zero;
        // the likelihood complement is computed before the clamp.
        let priors: Vec<String> = (0..5)
            .map(|i| format!("unique{i} buy now buy now buy now"))
            .collect();
        let sig = AuthenticitySignals {
            transcript: Some("buy now buy now buy now buy now. buy now buy now buy now buy now."),
            previous_promotions: &priors,
            hook_text: Some("buy now buy now"),
            brand_mention_timing: Some(0.0),
            visual_continuity: Some(0.0),
            ..base()
        };
        let report = evaluate(&sig);
        assert_eq!(report.score, 0);
        assert_eq!(report.script_likelihood, 100);
    }
}
