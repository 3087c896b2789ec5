//! # External Tool Capabilities
//!
//! Narrow interfaces over the command-line tools the checks depend on:
//! PDF metadata and text extraction, and the version-control file listing.
//! Checks only see the traits, so tests substitute in-memory fakes.
//!
//! A tool that cannot be spawned or exits non-zero is an
//! [`IntegrityViolation`], never retried.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use dreams_core::{IntegrityResult, IntegrityViolation};

/// PDF inspection.
pub trait PdfTools {
    /// Document metadata as lower-cased key → trimmed value.
    fn metadata(&self, pdf: &Path) -> IntegrityResult<BTreeMap<String, String>>;

    /// Plain text of pages `first..=last` (1-based).
    fn page_text(&self, pdf: &Path, first: u32, last: u32) -> IntegrityResult<String>;
}

/// Enumeration of version-controlled files.
pub trait TrackedFiles {
    /// Tracked paths, relative to `root`.
    fn list(&self, root: &Path) -> IntegrityResult<Vec<PathBuf>>;
}

/// Run a command to completion and return its standard output.
pub fn run_command(program: &str, args: &[&str], cwd: Option<&Path>) -> IntegrityResult<String> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    tracing::debug!(command = %command_line, "running external tool");

    let output = command
        .output()
        .map_err(|source| IntegrityViolation::ToolUnavailable {
            command: command_line.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        return Err(IntegrityViolation::ToolFailed {
            command: command_line,
            status: output.status.to_string(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(stdout)
}

/// Parse `Key: value` lines as printed by `pdfinfo`.
///
/// Lines without a colon are skipped. Only the first colon splits, so values
/// such as titles with subtitles survive intact.
pub fn parse_pdfinfo(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .collect()
}

/// Poppler's `pdfinfo` and `pdftotext`.
#[derive(Debug, Clone)]
pub struct PopplerTools {
    pdfinfo: String,
    pdftotext: String,
}

impl PopplerTools {
    pub fn new(pdfinfo: impl Into<String>, pdftotext: impl Into<String>) -> Self {
        Self {
            pdfinfo: pdfinfo.into(),
            pdftotext: pdftotext.into(),
        }
    }
}

impl PdfTools for PopplerTools {
    fn metadata(&self, pdf: &Path) -> IntegrityResult<BTreeMap<String, String>> {
        let pdf = pdf.to_string_lossy().into_owned();
        let stdout = run_command(&self.pdfinfo, &[pdf.as_str()], None)?;
        Ok(parse_pdfinfo(&stdout))
    }

    fn page_text(&self, pdf: &Path, first: u32, last: u32) -> IntegrityResult<String> {
        let pdf = pdf.to_string_lossy().into_owned();
        let first = first.to_string();
        let last = last.to_string();
        run_command(
            &self.pdftotext,
            &["-f", first.as_str(), "-l", last.as_str(), pdf.as_str(), "-"],
            None,
        )
    }
}

/// `git ls-files -z` in the bundle root. NUL separation keeps non-ASCII
/// names verbatim instead of C-quoted.
#[derive(Debug, Clone)]
pub struct GitLsFiles {
    git: String,
}

impl GitLsFiles {
    pub fn new(git: impl Into<String>) -> Self {
        Self { git: git.into() }
    }
}

impl TrackedFiles for GitLsFiles {
    fn list(&self, root: &Path) -> IntegrityResult<Vec<PathBuf>> {
        let stdout = run_command(&self.git, &["ls-files", "-z"], Some(root))?;
        Ok(stdout
            .split('\0')
            .filter(|name| !name.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}
