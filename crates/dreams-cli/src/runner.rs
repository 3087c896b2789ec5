//! # Validation Runner
//!
//! Executes the check battery in its fixed order and stops at the first
//! violation. The runner holds no state between runs; every check reloads
//! its inputs, so repeated runs over an unchanged tree agree.

use std::time::{Duration, Instant};

use thiserror::Error;

use dreams_core::IntegrityViolation;

use crate::checks::{CheckContext, CheckId};

/// Line printed when every check passes.
pub const SUCCESS_LINE: &str = "dreams integrity checks passed";

/// The first failing check and the violation it raised.
#[derive(Error, Debug)]
#[error("integrity check `{check}` failed: {source}")]
pub struct CheckFailure {
    pub check: CheckId,
    #[source]
    pub source: IntegrityViolation,
}

/// Outcome of a fully passing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Checks executed, in order.
    pub passed: Vec<CheckId>,
    pub elapsed: Duration,
}

/// Ordered, fail-fast executor.
pub struct Runner<'a> {
    ctx: CheckContext<'a>,
    battery: Vec<CheckId>,
}

impl<'a> Runner<'a> {
    /// Runner over the full battery.
    pub fn new(ctx: CheckContext<'a>) -> Self {
        Self::with_battery(ctx, CheckId::BATTERY.to_vec())
    }

    /// Runner over an explicit subset, still executed in the given order.
    pub fn with_battery(ctx: CheckContext<'a>, battery: Vec<CheckId>) -> Self {
        Self { ctx, battery }
    }

    pub fn run(&self) -> Result<RunReport, CheckFailure> {
        let started = Instant::now();
        let mut passed = Vec::with_capacity(self.battery.len());

        for &check in &self.battery {
            tracing::debug!(check = %check, "running check");
            let check_started = Instant::now();

            check
                .run(&self.ctx)
                .map_err(|source| CheckFailure { check, source })?;

            tracing::info!(
                check = %check,
                elapsed_ms = check_started.elapsed().as_millis() as u64,
                "check passed"
            );
            passed.push(check);
        }

        Ok(RunReport {
            passed,
            elapsed: started.elapsed(),
        })
    }
}
