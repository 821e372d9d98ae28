//! # Text Signals
//! Pure measures over short texts: token entropy, phrase reuse against a
//! creator's prior promotions, hook originality, caption overlap, and
//! sentence pacing. Everything here is deterministic and allocation-light;
//! the sub-models build their adjustments on top of these primitives.

use std::collections::{BTreeSet, HashMap};

/// Empirical ceiling for Shannon entropy of conversational English,
/// in bits per word. Divides raw entropy into [0,1].
const MAX_BITS_PER_WORD: f64 = 4.7;

/// Sliding window length for phrase-reuse scanning.
const REUSE_WINDOW: usize = 3;

/// Sentinel returned by [`caption_similarity`] when either side is missing:
/// an explicit "unknown", not a measured similarity.
pub const UNKNOWN_SIMILARITY: f64 = 0.5;

/// Whitespace tokens, lowercased. The measures that need a length floor
/// apply it themselves.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(|w| w.to_lowercase())
}

/// Collapse runs of whitespace so phrase windows match priors regardless
/// of how the upstream extractor wrapped lines.
fn flatten_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized Shannon entropy of the token distribution, in [0,1].
///
/// Tokens of length <= 2 are discarded before counting; a text with no
/// qualifying tokens (or a single repeated token) scores 0.
pub fn entropy(text: &str) -> f64 {
    let tokens: Vec<String> = words(text).filter(|t| t.chars().count() > 2).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for t in &tokens {
        *freq.entry(t.as_str()).or_insert(0) += 1;
    }

    let n = tokens.len() as f64;
    let mut bits = 0.0;
    for &count in freq.values() {
        let p = count as f64 / n;
        bits -= p * p.log2();
    }

    (bits / MAX_BITS_PER_WORD).min(1.0)
}

/// Count how many of `priors` contain a verbatim 3-token phrase from
/// `current`. Each prior counts at most once; the total is summed across
/// priors (a phrase shared with four priors counts four).
///
/// Matching is case-insensitive on whitespace-joined token windows.
pub fn phrase_reuse_count(current: &str, priors: &[String]) -> usize {
    let tokens: Vec<String> = words(current).collect();
    if tokens.len() < REUSE_WINDOW || priors.is_empty() {
        return 0;
    }

    let phrases: Vec<String> = tokens.windows(REUSE_WINDOW).map(|w| w.join(" ")).collect();

    priors
        .iter()
        .filter(|prior| {
            let haystack = flatten_ws(prior).to_lowercase();
            phrases.iter().any(|p| haystack.contains(p.as_str()))
        })
        .count()
}

/// Originality of a hook line against prior promotions, in [0,1].
///
/// Per prior we take the unique-token overlap ratio relative to the hook;
/// originality is one minus the mean overlap. No priors (or a degenerate
/// hook with no tokens) means there is nothing to be derivative of: 1.0.
pub fn hook_originality(hook: &str, priors: &[String]) -> f64 {
    if priors.is_empty() {
        return 1.0;
    }

    let hook_tokens: BTreeSet<String> = words(hook).collect();
    if hook_tokens.is_empty() {
        return 1.0;
    }

    let overlap_sum: f64 = priors
        .iter()
        .map(|prior| {
            let prior_tokens: BTreeSet<String> = words(prior).collect();
            let shared = hook_tokens.intersection(&prior_tokens).count();
            shared as f64 / hook_tokens.len() as f64
        })
        .sum();

    let avg_overlap = overlap_sum / priors.len() as f64;
    (1.0 - avg_overlap).clamp(0.0, 1.0)
}

/// Case-insensitive word-set overlap between two captions:
/// `|A ∩ B| / max(|A|, |B|)`, with single-character tokens excluded.
///
/// Returns [`UNKNOWN_SIMILARITY`] when either side is missing or empty;
/// callers that need a hard 0 must check presence themselves.
pub fn caption_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) if !a.trim().is_empty() && !b.trim().is_empty() => (a, b),
        _ => return UNKNOWN_SIMILARITY,
    };

    let set_a: BTreeSet<String> = words(a).filter(|t| t.chars().count() > 1).collect();
    let set_b: BTreeSet<String> = words(b).filter(|t| t.chars().count() > 1).collect();

    let denom = set_a.len().max(set_b.len());
    if denom == 0 {
        return UNKNOWN_SIMILARITY;
    }

    set_a.intersection(&set_b).count() as f64 / denom as f64
}

/// Pacing signal from per-sentence length variance, in [0,1].
///
/// Sentences split on `.!?`; the population variance of their token counts
/// is scaled by 1/100 and clamped. Fewer than 2 sentences is not enough
/// signal and returns the neutral 0.5.
pub fn natural_pacing(transcript: &str) -> f64 {
    let counts: Vec<f64> = transcript
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.split_whitespace().count() as f64)
        .collect();

    if counts.len() < 2 {
        return 0.5;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

    (variance / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_empty_and_degenerate_are_zero() {
        assert_eq!(entropy(""), 0.0);
        assert_eq!(entropy("a an of"), 0.0); // nothing longer than 2 chars
        assert_eq!(entropy("buy buy buy buy"), 0.0); // single repeated token
    }

    #[test]
    fn entropy_varied_text_beats_repetitive_text() {
        let varied = "honestly this serum completely changed how skin feels overnight without residue";
        let repetitive = "buy now buy now buy now buy now buy now";
        assert!(entropy(varied) > 0.7, "got {}", entropy(varied));
        assert!(entropy(repetitive) < 0.3, "got {}", entropy(repetitive));
    }

    #[test]
    fn entropy_is_capped_at_one() {
        let many: Vec<String> = (0..200).map(|i| format!("word{i:03}")).collect();
        assert_eq!(entropy(&many.join(" ")), 1.0);
    }

    #[test]
    fn phrase_reuse_counts_once_per_prior() {
        let current = "grab this amazing serum today before it sells out";
        let priors = vec![
            "you need THIS AMAZING SERUM in your life".to_string(),
            "this amazing serum again".to_string(),
            "totally unrelated post".to_string(),
        ];
        assert_eq!(phrase_reuse_count(current, &priors), 2);
    }

    #[test]
    fn phrase_reuse_needs_three_tokens() {
        assert_eq!(phrase_reuse_count("two words", &["two words".to_string()]), 0);
        assert_eq!(phrase_reuse_count("one two three", &[]), 0);
    }

    #[test]
    fn phrase_reuse_ignores_prior_line_wrapping() {
        let priors = vec!["grab this\n amazing   serum".to_string()];
        assert_eq!(phrase_reuse_count("this amazing serum rocks", &priors), 1);
    }

    #[test]
    fn hook_originality_without_priors_is_full() {
        assert_eq!(hook_originality("watch this trick", &[]), 1.0);
    }

    #[test]
    fn hook_originality_penalizes_overlap() {
        let priors = vec!["watch this trick now".to_string()];
        let orig = hook_originality("watch this trick", &priors);
        assert!(orig < 0.01, "full overlap should be ~0, got {orig}");

        let fresh = hook_originality("completely different opener", &priors);
        assert_eq!(fresh, 1.0);
    }

    #[test]
    fn caption_similarity_sentinel_on_missing() {
        assert_eq!(caption_similarity(None, Some("anything")), UNKNOWN_SIMILARITY);
        assert_eq!(caption_similarity(Some(""), Some("")), UNKNOWN_SIMILARITY);
        assert_eq!(caption_similarity(Some("   "), Some("x y")), UNKNOWN_SIMILARITY);
    }

    #[test]
    fn caption_similarity_overlap_ratio() {
        // {new, serum, drop} vs {new, serum, restock, alert}: 2 shared / max(3,4)
        let sim = caption_similarity(Some("new serum drop"), Some("new serum restock alert"));
        assert!((sim - 0.5).abs() < 1e-9);
        assert_eq!(caption_similarity(Some("same caption"), Some("same caption")), 1.0);
    }

    #[test]
    fn pacing_needs_two_sentences() {
        assert_eq!(natural_pacing("one long sentence with no terminator"), 0.5);
        assert_eq!(natural_pacing(""), 0.5);
    }

    #[test]
    fn pacing_flat_sentences_score_low() {
        // Identical lengths -> variance 0.
        assert_eq!(natural_pacing("one two three. one two three. one two three."), 0.0);
    }

    #[test]
    fn pacing_uneven_sentences_score_high() {
        // 1 token vs 21 tokens: variance = 100 -> scaled to 1.0.
        let long = "w ".repeat(21);
        let text = format!("wow! {long}.");
        assert_eq!(natural_pacing(&text), 1.0);
    }
}
