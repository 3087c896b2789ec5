//! # dreams-cli — Release-Integrity Validator
//!
//! Provides the `dreams-validate` command, which runs a fixed battery of
//! read-only checks over the public paper showcase bundle before release:
//!
//! ```bash
//! dreams-validate                 # discover the bundle root from the cwd
//! dreams-validate --root ../dreams -vv
//! ```
//!
//! ## Crate Policy
//!
//! - Checks never write to the bundle and never retry.
//! - The first violation ends the run; there is no partial pass.
//! - External tools sit behind [`tools::PdfTools`] and
//!   [`tools::TrackedFiles`] so every check is testable without them.

pub mod checks;
pub mod config;
pub mod runner;
pub mod tools;

pub use checks::{CheckContext, CheckId};
pub use config::RunConfig;
pub use runner::{CheckFailure, RunReport, Runner, SUCCESS_LINE};
