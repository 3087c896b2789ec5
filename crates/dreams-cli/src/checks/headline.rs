//! Headline claim regression guard.
//!
//! The published claims are exact: the guarded policy keeps pivots, primary
//! arcs and contracts at 1.0, and the recency baseline loses pivots and
//! primary arcs entirely. Any drift fails, with no tolerance.

use std::collections::HashMap;

use dreams_core::documents::RowKey;
use dreams_core::registry::headline::{BASELINE_POLICY, FRACTIONS, GUARDED_POLICY, PASSED_MARKER};
use dreams_core::{
    ensure, read_text, BundleLayout, Fraction, IntegrityResult, IntegrityViolation, ReplayRow,
    ReplaySummary,
};

pub fn check_headline_claims(layout: &BundleLayout) -> IntegrityResult<()> {
    let replay = ReplaySummary::load(&layout.replay_summary())?;
    check_claims(&replay)?;

    let summary = read_text(&layout.validation_summary())?;
    ensure(summary.contains(PASSED_MARKER), || {
        format!("VALIDATION_SUMMARY must report {PASSED_MARKER} tests")
    })
}

pub(crate) fn check_claims(replay: &ReplaySummary) -> IntegrityResult<()> {
    let index = replay.index();

    for &fraction in FRACTIONS {
        let guarded = lookup(&index, GUARDED_POLICY, fraction)?;
        let recency = lookup(&index, BASELINE_POLICY, fraction)?;

        exact(guarded.pivot_preservation_rate, 1.0, || {
            format!("{GUARDED_POLICY} pivot preservation must stay 1.0 at fraction={fraction}")
        })?;
        exact(guarded.primary_full_rate, 1.0, || {
            format!("{GUARDED_POLICY} primary_full_rate must stay 1.0 at fraction={fraction}")
        })?;
        exact(guarded.contract_satisfied_rate, 1.0, || {
            format!(
                "{GUARDED_POLICY} contract_satisfied_rate must stay 1.0 at fraction={fraction}"
            )
        })?;
        exact(recency.pivot_preservation_rate, 0.0, || {
            format!("{BASELINE_POLICY} pivot preservation must stay 0.0 at fraction={fraction}")
        })?;
        exact(recency.primary_full_rate, 0.0, || {
            format!("{BASELINE_POLICY} primary_full_rate must stay 0.0 at fraction={fraction}")
        })?;
    }
    Ok(())
}

fn lookup<'a>(
    index: &HashMap<RowKey, &'a ReplayRow>,
    policy: &str,
    fraction: f64,
) -> IntegrityResult<&'a ReplayRow> {
    let key = (policy.to_string(), Fraction::new(fraction).key());
    index.get(&key).copied().ok_or_else(|| {
        IntegrityViolation::condition(format!(
            "Missing replay row for {policy} at fraction={fraction}"
        ))
    })
}

#[allow(clippy::float_cmp)]
fn exact<F>(actual: f64, expected: f64, message: F) -> IntegrityResult<()>
where
    F: FnOnce() -> String,
{
    ensure(actual == expected, || format!("{} (found {actual})", message()))
}
