//! # Check Battery
//!
//! Independent integrity checks over a release bundle. Each check reads its
//! inputs fresh, returns `Ok(())` when every condition holds, and stops at
//! the first violated condition with a diagnostic naming the artifact and
//! the expected vs. actual values.
//!
//! [`CheckId::BATTERY`] is the fixed execution order used by the runner.

pub mod certificate;
pub mod citation;
pub mod consistency;
pub mod headline;
pub mod leaks;
pub mod papers;
pub mod structure;

use std::fmt;

use dreams_core::registry::PAPER_SPECS;
use dreams_core::{BundleLayout, IntegrityResult, PaperSpec};

use crate::tools::{PdfTools, TrackedFiles};

/// Everything a check may read: the bundle, the paper registry, and the
/// external tool capabilities.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub layout: &'a BundleLayout,
    pub papers: &'a [PaperSpec],
    pub pdf_tools: &'a dyn PdfTools,
    pub tracked_files: &'a dyn TrackedFiles,
}

impl<'a> CheckContext<'a> {
    /// Context over the published paper registry.
    pub fn new(
        layout: &'a BundleLayout,
        pdf_tools: &'a dyn PdfTools,
        tracked_files: &'a dyn TrackedFiles,
    ) -> Self {
        Self {
            layout,
            papers: PAPER_SPECS,
            pdf_tools,
            tracked_files,
        }
    }
}

/// Identity of one check in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckId {
    ReplayVsSite,
    HeadlineClaims,
    CertificateSync,
    PrivatePathLeaks,
    Structure,
    NoSymlinks,
    CitationMetadata,
    PaperSources,
    PaperFigures,
    PaperPdfs,
}

impl CheckId {
    /// Execution order. Cheap JSON comparisons first, external tools last.
    pub const BATTERY: [CheckId; 10] = [
        CheckId::ReplayVsSite,
        CheckId::HeadlineClaims,
        CheckId::CertificateSync,
        CheckId::PrivatePathLeaks,
        CheckId::Structure,
        CheckId::NoSymlinks,
        CheckId::CitationMetadata,
        CheckId::PaperSources,
        CheckId::PaperFigures,
        CheckId::PaperPdfs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::ReplayVsSite => "replay-vs-site",
            CheckId::HeadlineClaims => "headline-claims",
            CheckId::CertificateSync => "certificate-sync",
            CheckId::PrivatePathLeaks => "private-path-leaks",
            CheckId::Structure => "structure",
            CheckId::NoSymlinks => "no-symlinks",
            CheckId::CitationMetadata => "citation-metadata",
            CheckId::PaperSources => "paper-sources",
            CheckId::PaperFigures => "paper-figures",
            CheckId::PaperPdfs => "paper-pdfs",
        }
    }

    /// Run this check against a bundle.
    pub fn run(self, ctx: &CheckContext<'_>) -> IntegrityResult<()> {
        match self {
            CheckId::ReplayVsSite => consistency::check_replay_vs_site(ctx.layout),
            CheckId::HeadlineClaims => headline::check_headline_claims(ctx.layout),
            CheckId::CertificateSync => certificate::check_certificate_sync(ctx.layout),
            CheckId::PrivatePathLeaks => {
                leaks::check_private_path_leaks(ctx.layout, ctx.tracked_files)
            }
            CheckId::Structure => structure::check_structure(ctx.layout),
            CheckId::NoSymlinks => structure::check_no_symlinks(ctx.layout),
            CheckId::CitationMetadata => citation::check_citation_metadata(ctx.layout),
            CheckId::PaperSources => papers::check_paper_sources(ctx.layout, ctx.papers),
            CheckId::PaperFigures => papers::check_paper_figures(ctx.layout, ctx.papers),
            CheckId::PaperPdfs => papers::check_paper_pdfs(ctx.layout, ctx.papers, ctx.pdf_tools),
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
