//! Replay summary vs. site mirror.
//!
//! Every (policy, fraction) shown on the site must come from the replay
//! summary, with all four rates equal within [`RATE_TOLERANCE`]. Fractions
//! are compared through [`dreams_core::Fraction::key`], so `"0.5"` on the
//! site matches `0.50` in the summary.

use dreams_core::registry::RATE_TOLERANCE;
use dreams_core::{ensure, BundleLayout, Fraction, IntegrityResult, IntegrityViolation};
use dreams_core::{ReplaySummary, SiteMirror};

pub fn check_replay_vs_site(layout: &BundleLayout) -> IntegrityResult<()> {
    let replay = ReplaySummary::load(&layout.replay_summary())?;
    let site = SiteMirror::load(&layout.site_mirror())?;
    compare(&replay, &site)
}

pub(crate) fn compare(replay: &ReplaySummary, site: &SiteMirror) -> IntegrityResult<()> {
    let index = replay.index();

    for (policy, fractions) in &site.policies {
        for (fraction, site_rates) in fractions {
            let normalized = Fraction::parse(fraction).ok_or_else(|| {
                IntegrityViolation::condition(format!(
                    "Site fraction for {policy} is not a number: \"{fraction}\""
                ))
            })?;
            let key = (policy.clone(), normalized.key());
            let row = index.get(&key).ok_or_else(|| {
                IntegrityViolation::condition(format!("Missing replay row for {key:?}"))
            })?;
            let replay_rates = row.rates();
            for ((field, lhs), (_, rhs)) in site_rates.fields().into_iter().zip(replay_rates.fields())
            {
                ensure((lhs - rhs).abs() <= RATE_TOLERANCE, || {
                    format!("Mismatch for {policy} {fraction} {field}: {lhs} != {rhs}")
                })?;
            }
        }
    }
    Ok(())
}
