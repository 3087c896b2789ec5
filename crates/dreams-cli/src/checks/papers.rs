//! # Paper Checks
//!
//! Three checks per registered paper:
//!
//! - **sources** — the TeX source carries the draft-status phrase, the CC-BY
//!   link, and hyperref title/author/subject metadata.
//! - **figures** — every `\includegraphics` target resolves inside the
//!   source directory; upward traversal is rejected outright.
//! - **pdfs** — the published PDF's metadata matches the registry exactly,
//!   it is long enough to be the real paper, and its first page shows the
//!   draft status and license. No published PDF may carry "draft" in its
//!   filename.

use regex_lite::Regex;

use dreams_core::registry::paper::{
    BANNED_NAME_FRAGMENT, DRAFT_STATUS, INCLUDE_GRAPHICS_PATTERN, LICENSE_URL, METADATA_TOKENS,
    MIN_PAGES, PAGE_LICENSE_MARKER, PDF_PREFIX, PDF_SUFFIX, TRAVERSAL_TOKEN,
};
use dreams_core::{ensure, read_text, BundleLayout, IntegrityResult, IntegrityViolation, PaperSpec};

use crate::tools::PdfTools;

pub(crate) fn compile(pattern: &str) -> IntegrityResult<Regex> {
    Regex::new(pattern).map_err(|e| {
        IntegrityViolation::condition(format!("invalid pattern {pattern:?}: {e}"))
    })
}

pub fn check_paper_sources(layout: &BundleLayout, papers: &[PaperSpec]) -> IntegrityResult<()> {
    for spec in papers {
        let key = spec.key;
        let tex = layout.paper_tex(spec);
        ensure(tex.exists(), || {
            format!("{key}: missing TeX source {}", tex.display())
        })?;
        let text = read_text(&tex)?;

        ensure(text.contains(DRAFT_STATUS), || {
            format!("{key}: source must include {DRAFT_STATUS} marker")
        })?;
        ensure(text.contains(LICENSE_URL), || {
            format!("{key}: source must include CC-BY 4.0 license link ({LICENSE_URL})")
        })?;
        for token in METADATA_TOKENS {
            ensure(text.contains(token), || {
                format!("{key}: source missing PDF metadata token {token}")
            })?;
        }
    }
    Ok(())
}

pub fn check_paper_figures(layout: &BundleLayout, papers: &[PaperSpec]) -> IntegrityResult<()> {
    let include = compile(INCLUDE_GRAPHICS_PATTERN)?;

    for spec in papers {
        let key = spec.key;
        let tex = layout.paper_tex(spec);
        let text = read_text(&tex)?;
        let source_dir = tex.parent().unwrap_or(layout.root());

        for reference in figure_references(&include, &text) {
            ensure(!reference.contains(TRAVERSAL_TOKEN), || {
                format!("{key}: figure reference must not traverse upward: {reference}")
            })?;
            let asset = source_dir.join(reference);
            ensure(asset.exists(), || {
                format!(
                    "{key}: missing figure asset referenced by TeX: {}",
                    asset.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Targets of every `\includegraphics[...]{...}` in document order.
pub fn figure_references<'t>(include: &Regex, text: &'t str) -> Vec<&'t str> {
    include
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub fn check_paper_pdfs(
    layout: &BundleLayout,
    papers: &[PaperSpec],
    tools: &dyn PdfTools,
) -> IntegrityResult<()> {
    for spec in papers {
        check_one_pdf(layout, spec, tools)?;
    }
    check_published_names(layout)
}

fn check_one_pdf(layout: &BundleLayout, spec: &PaperSpec, tools: &dyn PdfTools) -> IntegrityResult<()> {
    let key = spec.key;
    let pdf = layout.paper_pdf(spec);
    ensure(pdf.exists(), || format!("{key}: missing PDF {}", pdf.display()))?;

    let info = tools.metadata(&pdf)?;
    let title = info.get("title").map(String::as_str).unwrap_or("");
    ensure(title == spec.title, || {
        format!(
            "{key}: PDF title mismatch: expected {:?}, found {title:?}",
            spec.title
        )
    })?;
    let author = info.get("author").map(String::as_str).unwrap_or("");
    ensure(author == spec.author, || {
        format!(
            "{key}: PDF author mismatch: expected {:?}, found {author:?}",
            spec.author
        )
    })?;

    let pages = info.get("pages").ok_or_else(|| {
        IntegrityViolation::condition(format!("{key}: missing page count in PDF metadata"))
    })?;
    let count: u32 = pages.parse().map_err(|_| {
        IntegrityViolation::condition(format!("{key}: unreadable page count {pages:?}"))
    })?;
    ensure(count >= MIN_PAGES, || {
        format!("{key}: PDF looks unexpectedly short ({count} pages)")
    })?;

    let first_page = tools.page_text(&pdf, 1, 1)?;
    ensure(first_page.contains(DRAFT_STATUS), || {
        format!("{key}: first page must visibly show {DRAFT_STATUS}")
    })?;
    ensure(first_page.contains(PAGE_LICENSE_MARKER), || {
        format!("{key}: first page must visibly show {PAGE_LICENSE_MARKER}")
    })?;

    tracing::debug!(paper = key, pages = count, "paper PDF verified");
    Ok(())
}

/// Every `papers/paper_*.pdf` is a release artifact and must not be named
/// as a draft.
fn check_published_names(layout: &BundleLayout) -> IntegrityResult<()> {
    let dir = layout.papers_dir();
    if !dir.is_dir() {
        return Ok(());
    }
    let io_error = |source| IntegrityViolation::Io {
        path: dir.clone(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(io_error)? {
        let name = entry.map_err(io_error)?.file_name();
        let name = name.to_string_lossy().into_owned();
        if name.starts_with(PDF_PREFIX) && name.ends_with(PDF_SUFFIX) {
            names.push(name);
        }
    }
    names.sort();

    for name in names {
        ensure(!name.to_lowercase().contains(BANNED_NAME_FRAGMENT), || {
            format!("Published PDF filename should not contain '{BANNED_NAME_FRAGMENT}': {name}")
        })?;
    }
    Ok(())
}
