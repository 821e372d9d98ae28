// tests/bounds_sweep.rs
//
// Synthetic sweep (seeded RNG, deterministic runs): every emitted score
// stays in [0,100] and the confidence interval stays ordered and
// clipped, no matter how adversarial the optional inputs get.

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use accs_engine::inputs::{
    AccsInputs, BrandContent, ContentStructure, CreatorHistory, EngagementMetrics,
    PromotionalPost, SimilarContent,
};
use accs_engine::compute_accs;

const CASES: usize = 200;

const WORD_POOL: &[&str] = &[
    "honestly", "serum", "routine", "glow", "buy", "now", "link", "love", "scam", "amazing",
    "terrible", "price", "skin", "days", "trying", "this", "really", "works", "never", "again",
];

const HOOKS: &[&str] = &["question", "pov", "unboxing", "before_after"];
const VISUALS: &[&str] = &["talking_head", "grid", "voiceover_broll"];
const AUDIO: &[&str] = &["trending_song", "original_audio"];

fn random_text(rng: &mut StdRng, max_words: usize) -> String {
    let n = rng.random_range(0..=max_words);
    (0..n)
        .map(|_| WORD_POOL[rng.random_range(0..WORD_POOL.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_structure(rng: &mut StdRng) -> ContentStructure {
    ContentStructure {
        hook_type: Some(HOOKS[rng.random_range(0..HOOKS.len())].to_string()),
        visual_composition: Some(VISUALS[rng.random_range(0..VISUALS.len())].to_string()),
        audio_trend: Some(AUDIO[rng.random_range(0..AUDIO.len())].to_string()),
        duration_secs: Some(rng.random_range(5.0..180.0)),
    }
}

fn random_inputs(rng: &mut StdRng, case: usize) -> AccsInputs {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let engagement = EngagementMetrics {
        likes: Some(rng.random_range(0..1_000_000)),
        comments: Some(rng.random_range(0..50_000)),
        shares: Some(rng.random_range(0..50_000)),
        saves: Some(rng.random_range(0..100_000)),
        views: Some(rng.random_range(0..10_000_000)),
        comment_texts: (0..rng.random_range(0..20))
            .map(|_| random_text(rng, 8))
            .collect(),
    };

    let history = CreatorHistory {
        previous_promotions: (0..rng.random_range(0..10))
            .map(|_| random_text(rng, 20))
            .collect(),
        script_patterns: Vec::new(),
        promotional_posts: (0..rng.random_range(0..60))
            .map(|_| PromotionalPost {
                date: now - Duration::days(rng.random_range(0..200)),
                brand_name: if rng.random_bool(0.7) {
                    Some(format!("brand{}", rng.random_range(0..8)))
                } else {
                    None
                },
                category: if rng.random_bool(0.5) {
                    Some(format!("cat{}", rng.random_range(0..4)))
                } else {
                    None
                },
            })
            .collect(),
    };

    AccsInputs {
        content_item_id: format!("sweep-{case}"),
        transcript: if rng.random_bool(0.8) {
            Some(random_text(rng, 60))
        } else {
            None
        },
        caption: if rng.random_bool(0.6) {
            Some(random_text(rng, 15))
        } else {
            None
        },
        engagement_metrics: Some(engagement),
        creator_history: Some(history),
        similar_content: (0..rng.random_range(0..12))
            .map(|i| SimilarContent {
                id: format!("sim-{i}"),
                structure: random_structure(rng),
                similarity: rng.random_range(0.0..=1.0),
            })
            .collect(),
        brand_history: (0..rng.random_range(0..8))
            .map(|i| BrandContent {
                content_id: format!("brand-{i}"),
                structure: random_structure(rng),
            })
            .collect(),
        brand_mention_timing: if rng.random_bool(0.5) {
            Some(rng.random_range(0.0..=1.0))
        } else {
            None
        },
        hook_text: if rng.random_bool(0.5) {
            Some(random_text(rng, 6))
        } else {
            None
        },
        visual_continuity: if rng.random_bool(0.5) {
            Some(rng.random_range(0.0..=1.0))
        } else {
            None
        },
        content_structure: Some(random_structure(rng)),
        industry_trends: None,
        scored_at: Some(now),
    }
}

#[test]
fn every_emitted_score_is_bounded() {
    let mut rng = StdRng::seed_from_u64(0xACC5);

    for case in 0..CASES {
        let inputs = random_inputs(&mut rng, case);
        let result = compute_accs(&inputs)
            .unwrap_or_else(|e| panic!("case {case} rejected valid inputs: {e}"));

        assert!(result.score <= 100, "case {case}: score {}", result.score);
        assert!(result.authenticity.score <= 100);
        assert!(result.authenticity.script_likelihood <= 100);
        assert!(result.audience_trust.score <= 100);
        assert!(result.audience_trust.purchase_intent_confidence <= 100);
        assert!(result.promotion_saturation.score <= 100);
        assert!(result.promotion_saturation.density <= 100);
        assert!(result.fatigue_risk.score <= 100);
        assert!(result.fatigue_risk.originality_percentile <= 100);

        let ci = &result.confidence_interval;
        assert!(ci.lower <= ci.upper, "case {case}: {ci:?}");
        assert!(ci.lower >= 0.0 && ci.upper <= 100.0, "case {case}: {ci:?}");
    }
}

#[test]
fn sweep_is_reproducible() {
    let mut a = StdRng::seed_from_u64(7);
    let mut b = StdRng::seed_from_u64(7);

    for case in 0..10 {
        let ra = compute_accs(&random_inputs(&mut a, case)).unwrap();
        let rb = compute_accs(&random_inputs(&mut b, case)).unwrap();
        assert_eq!(ra, rb);
    }
}
