//! # dreams-core — Foundational Types for the Release-Integrity Checker
//!
//! This crate defines what the checker reads and what it reports. It has no
//! internal crate dependencies and performs no process spawning or logging;
//! only `serde`, `serde_json`, and `thiserror` from the external ecosystem.
//!
//! ## Contents
//!
//! - [`registry`] — immutable ground-truth tables: paper specs, forbidden
//!   tokens, required paths, headline claims.
//! - [`layout`] — fixed artifact locations relative to the bundle root.
//! - [`documents`] — typed JSON artifacts and file loading.
//! - [`error`] — [`IntegrityViolation`], the single error kind.

pub mod documents;
pub mod error;
pub mod layout;
pub mod registry;

pub use documents::{load_json, read_text, Fraction, RateRecord, ReplayRow, ReplaySummary, SiteMirror};
pub use error::{ensure, IntegrityResult, IntegrityViolation};
pub use layout::BundleLayout;
pub use registry::PaperSpec;
