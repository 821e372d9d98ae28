//! Scores a single inputs document and prints the result.
//!
//! Usage: `cargo run --bin score_demo -- path/to/inputs.json`

use anyhow::Context;

use accs_engine::{compute_accs, AccsInputs};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: score_demo <inputs.json>")?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read inputs from {path}"))?;
    let inputs: AccsInputs =
        serde_json::from_str(&raw).with_context(|| format!("invalid inputs JSON in {path}"))?;

    let result = compute_accs(&inputs)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
