//! Anonymized dev-only diagnostics for scoring events.
//!
//! Enable with `ACCS_DEV_LOG=1`; active only in debug builds or with the
//! `debug` cargo feature, so production scoring stays quiet. Raw
//! transcript/comment text is never logged, only a truncated content
//! hash and the numeric components.

use tracing::info;

/// Dev logging gate: ACCS_DEV_LOG=1 AND a dev build (debug_assertions or
/// the `debug` feature).
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("ACCS_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    cfg!(debug_assertions) || cfg!(feature = "debug")
}

/// Short, stable, anonymized id for a text sample.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Minimal score-event logger. `content_key` should already be opaque
/// (the caller hashes any text-derived key).
pub(crate) fn dev_log_score(
    content_key: &str,
    final_score: u32,
    authenticity: u32,
    trust: u32,
    saturation: f64,
    fatigue: u32,
) {
    if !dev_logging_enabled() {
        return;
    }
    info!(
        target: "accs",
        key = %content_key,
        score = final_score,
        authenticity,
        trust,
        saturation,
        fatigue,
        "scored"
    );
}
