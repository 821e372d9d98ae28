//! # Promotion Saturation Model
//! Windowed statistics over a creator's promotional-post history: how
//! densely they have been promoting, for how many brands, and how
//! clustered the posts are. The sub-score is inverted: a lightly
//! promoted creator scores high.
//!
//! The density ratio divides the recent post count by an assumed 30
//! posts per period, not the creator's actual output; see DESIGN.md.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

use crate::inputs::PromotionalPost;
use crate::score::{SaturationReport, SignalLevel};

/// Lookback window for "recent" promotions.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;

/// Assumed posts-per-period baseline the density ratio is normalized by.
pub const ASSUMED_POSTS_PER_PERIOD: f64 = 30.0;

// Risk-point buckets.
const RATIO_STEPS: [f64; 3] = [0.15, 0.3, 0.5];
const BRAND_STEPS: [usize; 3] = [1, 3, 5];
const CLUSTERING_STEPS: [f64; 2] = [0.5, 0.7];
const SPACING_TIGHT_DAYS: f64 = 3.0;
const SPACING_CLOSE_DAYS: f64 = 7.0;

const RISK_HIGH_MIN: u32 = 7;
const RISK_MEDIUM_MIN: u32 = 4;

const COOLDOWN_HIGH_DAYS: u32 = 30;
const COOLDOWN_MEDIUM_DAYS: u32 = 14;
const COOLDOWN_LOW_DAYS: u32 = 7;

const DENSITY_HIGH_MIN: f64 = 60.0;
const DENSITY_MEDIUM_MIN: f64 = 30.0;

/// Raw windowed statistics plus the bucketed risk result.
#[derive(Debug, Clone)]
pub struct SaturationOutcome {
    /// Recent posts / assumed per-period baseline, capped at 1.
    pub promotional_post_ratio: f64,
    /// Distinct non-null brand names in the window (case-insensitive).
    pub competing_brands: usize,
    /// Σ over categories of (count − 1), per categorized post.
    pub category_overlap_freq: f64,
    /// 1 − avg-gap/period over sorted timestamps; 0 with fewer than 2 posts.
    pub promotion_clustering: f64,
    /// Mean gap between consecutive posts, in days. None with < 2 posts.
    pub sponsored_spacing_avg_days: Option<f64>,
    pub risk_points: u32,
    pub risk_level: SignalLevel,
    pub recommended_cooldown_days: u32,
}

/// Evaluate with the default 90-day window.
pub fn evaluate(posts: &[PromotionalPost], now: DateTime<Utc>) -> SaturationOutcome {
    evaluate_with_window(posts, now, DEFAULT_LOOKBACK_DAYS)
}

pub fn evaluate_with_window(
    posts: &[PromotionalPost],
    now: DateTime<Utc>,
    window_days: i64,
) -> SaturationOutcome {
    let cutoff = now - Duration::days(window_days);
    let mut recent: Vec<&PromotionalPost> = posts.iter().filter(|p| p.date >= cutoff).collect();
    recent.sort_by_key(|p| p.date);

    let promotional_post_ratio = (recent.len() as f64 / ASSUMED_POSTS_PER_PERIOD).min(1.0);

    let brands: HashSet<String> = recent
        .iter()
        .filter_map(|p| p.brand_name.as_deref())
        .map(|b| b.trim().to_lowercase())
        .filter(|b| !b.is_empty())
        .collect();
    let competing_brands = brands.len();

    let mut category_counts: HashMap<&str, usize> = HashMap::new();
    for post in &recent {
        if let Some(cat) = post.category.as_deref() {
            *category_counts.entry(cat).or_insert(0) += 1;
        }
    }
    let categorized: usize = category_counts.values().sum();
    let category_overlap_freq = if categorized > 0 {
        let repeats: usize = category_counts.values().map(|c| c - 1).sum();
        repeats as f64 / categorized as f64
    } else {
        0.0
    };

    let period_ms = (window_days * 24 * 3600 * 1000) as f64;
    let gaps_ms: Vec<f64> = recent
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_milliseconds() as f64)
        .collect();

    let promotion_clustering = if gaps_ms.is_empty() {
        0.0
    } else {
        let avg_gap = gaps_ms.iter().sum::<f64>() / gaps_ms.len() as f64;
        (1.0 - avg_gap / period_ms).clamp(0.0, 1.0)
    };

    let sponsored_spacing_avg_days = if gaps_ms.is_empty() {
        None
    } else {
        let avg_gap = gaps_ms.iter().sum::<f64>() / gaps_ms.len() as f64;
        Some(avg_gap / (24.0 * 3600.0 * 1000.0))
    };

    let risk_points = risk_points(
        promotional_post_ratio,
        competing_brands,
        promotion_clustering,
        sponsored_spacing_avg_days,
    );
    let risk_level = risk_level(risk_points);

    SaturationOutcome {
        promotional_post_ratio,
        competing_brands,
        category_overlap_freq,
        promotion_clustering,
        sponsored_spacing_avg_days,
        risk_points,
        risk_level,
        recommended_cooldown_days: cooldown_for(risk_level),
    }
}

fn risk_points(
    ratio: f64,
    brands: usize,
    clustering: f64,
    spacing_days: Option<f64>,
) -> u32 {
    let mut points = 0;

    if ratio > RATIO_STEPS[2] {
        points += 3;
    } else if ratio > RATIO_STEPS[1] {
        points += 2;
    } else if ratio > RATIO_STEPS[0] {
        points += 1;
    }

    if brands > BRAND_STEPS[2] {
        points += 3;
    } else if brands > BRAND_STEPS[1] {
        points += 2;
    } else if brands > BRAND_STEPS[0] {
        points += 1;
    }

    if clustering > CLUSTERING_STEPS[1] {
        points += 2;
    } else if clustering > CLUSTERING_STEPS[0] {
        points += 1;
    }

    if let Some(days) = spacing_days {
        if days < SPACING_TIGHT_DAYS {
            points += 2;
        } else if days < SPACING_CLOSE_DAYS {
            points += 1;
        }
    }

    points
}

fn risk_level(points: u32) -> SignalLevel {
    if points >= RISK_HIGH_MIN {
        SignalLevel::High
    } else if points >= RISK_MEDIUM_MIN {
        SignalLevel::Medium
    } else {
        SignalLevel::Low
    }
}

pub fn cooldown_for(risk: SignalLevel) -> u32 {
    match risk {
        SignalLevel::High => COOLDOWN_HIGH_DAYS,
        SignalLevel::Medium => COOLDOWN_MEDIUM_DAYS,
        SignalLevel::Low => COOLDOWN_LOW_DAYS,
    }
}

impl SaturationOutcome {
    /// Density in percent within the window.
    pub fn density(&self) -> f64 {
        self.promotional_post_ratio * 100.0
    }

    /// Inverted sub-score: 100 − density.
    pub fn inverted_score(&self) -> f64 {
        100.0 - self.density()
    }

    pub fn report(&self) -> SaturationReport {
        let density = self.density();
        let level = if density >= DENSITY_HIGH_MIN {
            SignalLevel::High
        } else if density >= DENSITY_MEDIUM_MIN {
            SignalLevel::Medium
        } else {
            SignalLevel::Low
        };

        SaturationReport {
            score: self.inverted_score().round().clamp(0.0, 100.0) as u32,
            level,
            density: density.round().clamp(0.0, 100.0) as u32,
            risk_level: self.risk_level,
            recommended_cooldown_days: self.recommended_cooldown_days,
        }
    }
}
