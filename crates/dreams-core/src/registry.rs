//! # Fixed Registries
//!
//! Ground-truth tables for the release bundle. Everything here is immutable
//! `const`/`static` data; paths are relative to the bundle root and resolved
//! through [`crate::BundleLayout`].
//!
//! The forbidden-token literals live in this file, which is why the leak
//! scanner skips [`REGISTRY_SOURCE`].

/// Expected metadata for one published paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperSpec {
    /// Stable paper key, used in every diagnostic.
    pub key: &'static str,
    /// Published PDF, relative to the bundle root.
    pub pdf: &'static str,
    /// TeX source, relative to the bundle root.
    pub tex: &'static str,
    /// Exact PDF `Title` metadata.
    pub title: &'static str,
    /// Exact PDF `Author` metadata.
    pub author: &'static str,
}

const AUTHOR: &str = "Jack Chaudier Gaffney";

/// The four papers in the release, in publication order.
pub static PAPER_SPECS: &[PaperSpec] = &[
    PaperSpec {
        key: "paper_01_absorbing_states_in_greedy_search",
        pdf: "papers/paper_01_absorbing_states_in_greedy_search.pdf",
        tex: "papers/sources/paper_01_main.tex",
        title: "Absorbing States in Greedy Search: When Endogenous Constraints Break Sequential Extraction",
        author: AUTHOR,
    },
    PaperSpec {
        key: "paper_02_streaming_oscillation_traps",
        pdf: "papers/paper_02_streaming_oscillation_traps.pdf",
        tex: "papers/sources/paper_02_main.tex",
        title: "Streaming Oscillation Traps in Endogenous-Pivot Sequential Extraction",
        author: AUTHOR,
    },
    PaperSpec {
        key: "paper_03_validity_mirage_compression",
        pdf: "papers/paper_03_validity_mirage_compression.pdf",
        tex: "papers/sources/paper_03_main.tex",
        title: "The Validity Mirage: Context Algebra for Endogenous Semantics under Memory Compression",
        author: AUTHOR,
    },
    PaperSpec {
        key: "paper_i_tropical_algebra",
        pdf: "papers/paper_i_tropical_algebra.pdf",
        tex: "papers/sources/paper_i_main.tex",
        title: "Tropical Algebra of Endogenous-Pivot Semantics: Absorbing States, Necessity, and the Record-Gap Spectrum",
        author: AUTHOR,
    },
];

/// File suffixes treated as text by the leak scanner. Compared lower-cased.
pub const TEXT_SUFFIXES: &[&str] = &[
    "md", "txt", "json", "toml", "yaml", "yml", "py", "js", "css", "html", "tex", "bib", "cff",
    "rs",
];

/// Substrings that must never appear in a tracked text file.
pub const FORBIDDEN_TOKENS: &[&str] = &[
    "../mirage/",
    "/Users/jackg/mirage",
    "/Users/jackg/dreams/../mirage",
];

/// This source file, relative to the workspace root. Exempt from leak scanning.
pub const REGISTRY_SOURCE: &str = file!();

/// Paths that must exist in every release.
pub const REQUIRED_PATHS: &[&str] = &[
    "notebooks/README.md",
    "tests/README.md",
    "CITATION.cff",
    ".zenodo.json",
    "papers/LICENSE_CC_BY_4_0.md",
];

/// Directories published verbatim; none may contain a symlink.
pub const PUBLIC_BUNDLE_DIRS: &[&str] = &["papers", "site", "results"];

/// Absolute tolerance for replay/site rate comparisons.
pub const RATE_TOLERANCE: f64 = 1e-12;

/// Previously published experimental claims guarded against drift.
pub mod headline {
    /// Policy that must stay perfect.
    pub const GUARDED_POLICY: &str = "l2_guarded";
    /// Baseline policy that must stay at zero.
    pub const BASELINE_POLICY: &str = "recency";
    /// Retention fractions the claims are made at.
    pub const FRACTIONS: &[f64] = &[0.65, 0.5, 0.4];
    /// Literal the validation summary must contain.
    pub const PASSED_MARKER: &str = "30 passed";
}

/// Deposit/citation metadata expectations.
pub mod citation {
    /// `.zenodo.json` `upload_type`.
    pub const UPLOAD_TYPE: &str = "publication";
    /// `.zenodo.json` `publication_type`.
    pub const PUBLICATION_TYPE: &str = "workingpaper";
    /// `.zenodo.json` `license`.
    pub const LICENSE_ID: &str = "CC-BY-4.0";
    /// Literal license line in `CITATION.cff`.
    pub const CFF_LICENSE_LINE: &str = "license: CC-BY-4.0";
    /// Public source repository.
    pub const REPOSITORY_URL: &str = "https://github.com/jack-chaudier/dreams";
    /// Top-level title line in `CITATION.cff`.
    pub const CFF_TITLE_PATTERN: &str = r#"(?m)^title:\s*"([^"]+)""#;
    /// One match per paper reference.
    pub const PREPRINT_PATTERN: &str = r"status:\s*preprint";
    /// Papers 1/2/3/I.
    pub const MIN_PREPRINT_REFS: usize = 4;
}

/// Markers that identify a released paper source or first page.
pub mod paper {
    /// Draft-status phrase required in TeX and on the first PDF page.
    pub const DRAFT_STATUS: &str = "Working Paper (First Draft)";
    /// License link required in the TeX source.
    pub const LICENSE_URL: &str = "creativecommons.org/licenses/by/4.0/";
    /// hyperref metadata tokens required in the TeX source.
    pub const METADATA_TOKENS: &[&str] = &["pdftitle={", "pdfauthor={", "pdfsubject={"];
    /// License marker visible on the first PDF page.
    pub const PAGE_LICENSE_MARKER: &str = "CC-BY 4.0";
    /// `\includegraphics[opts]{path}`.
    pub const INCLUDE_GRAPHICS_PATTERN: &str = r"\\includegraphics(?:\[[^\]]*\])?\{([^}]+)\}";
    /// Upward traversal is never allowed in figure references.
    pub const TRAVERSAL_TOKEN: &str = "..";
    /// A release PDF shorter than this is almost certainly truncated.
    pub const MIN_PAGES: u32 = 8;
    /// Published PDFs are matched by this prefix and suffix.
    pub const PDF_PREFIX: &str = "paper_";
    /// Published PDF suffix.
    pub const PDF_SUFFIX: &str = ".pdf";
    /// Lower-cased substring banned from published PDF names.
    pub const BANNED_NAME_FRAGMENT: &str = "draft";
}
