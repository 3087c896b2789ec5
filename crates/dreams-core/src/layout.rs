//! # Bundle Layout
//!
//! Fixed relative locations of every artifact the checker reads. All
//! accessors join onto the bundle root; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::registry::PaperSpec;

/// Replay summary produced by the experiment pipeline.
pub const REPLAY_SUMMARY: &str = "results/replay/replay_summary.json";
/// Site mirror of the replay rates.
pub const SITE_MIRROR: &str = "site/data_miragekit.json";
/// Human-written summary of the validation test run.
pub const VALIDATION_SUMMARY: &str = "results/VALIDATION_SUMMARY.md";
/// Canonical memory-safety certificate.
pub const CERTIFICATE: &str = "results/certificates/memory_safety_certificate.json";
/// Site copy of the certificate.
pub const SITE_CERTIFICATE: &str = "site/data_certificate.json";
/// Citation File Format metadata.
pub const CITATION: &str = "CITATION.cff";
/// Zenodo deposit metadata.
pub const ZENODO: &str = ".zenodo.json";
/// Published papers.
pub const PAPERS_DIR: &str = "papers";

/// Root of a release bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
}

impl BundleLayout {
    /// Wrap a bundle root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The bundle root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a root-relative path.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn replay_summary(&self) -> PathBuf {
        self.join(REPLAY_SUMMARY)
    }

    pub fn site_mirror(&self) -> PathBuf {
        self.join(SITE_MIRROR)
    }

    pub fn validation_summary(&self) -> PathBuf {
        self.join(VALIDATION_SUMMARY)
    }

    pub fn certificate(&self) -> PathBuf {
        self.join(CERTIFICATE)
    }

    pub fn site_certificate(&self) -> PathBuf {
        self.join(SITE_CERTIFICATE)
    }

    pub fn citation(&self) -> PathBuf {
        self.join(CITATION)
    }

    pub fn zenodo(&self) -> PathBuf {
        self.join(ZENODO)
    }

    pub fn papers_dir(&self) -> PathBuf {
        self.join(PAPERS_DIR)
    }

    /// Published PDF for a paper.
    pub fn paper_pdf(&self, spec: &PaperSpec) -> PathBuf {
        self.join(spec.pdf)
    }

    /// TeX source for a paper.
    pub fn paper_tex(&self, spec: &PaperSpec) -> PathBuf {
        self.join(spec.tex)
    }
}
