//! Run configuration.
//!
//! Resolved once at start-up from the command line and environment:
//!
//! - `--root <DIR>` or `DREAMS_ROOT` — bundle root. Otherwise the nearest
//!   ancestor of the working directory containing both `papers/` and
//!   `site/`, falling back to the working directory itself.
//! - `DREAMS_PDFINFO` (default `pdfinfo`)
//! - `DREAMS_PDFTOTEXT` (default `pdftotext`)
//! - `DREAMS_GIT` (default `git`)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::tools::{GitLsFiles, PopplerTools};

pub const ROOT_ENV: &str = "DREAMS_ROOT";
pub const PDFINFO_ENV: &str = "DREAMS_PDFINFO";
pub const PDFTOTEXT_ENV: &str = "DREAMS_PDFTOTEXT";
pub const GIT_ENV: &str = "DREAMS_GIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub root: PathBuf,
    pub pdfinfo: String,
    pub pdftotext: String,
    pub git: String,
}

impl RunConfig {
    /// Resolve from the process environment and working directory.
    pub fn resolve(root_flag: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::resolve_with(root_flag, |key| std::env::var(key).ok(), &cwd)
    }

    /// Resolve against an explicit environment lookup and working directory.
    pub fn resolve_with<E>(root_flag: Option<PathBuf>, env: E, cwd: &Path) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let root = match root_flag.or_else(|| env(ROOT_ENV).map(PathBuf::from)) {
            Some(explicit) => {
                let explicit = if explicit.is_absolute() {
                    explicit
                } else {
                    cwd.join(explicit)
                };
                if !explicit.is_dir() {
                    bail!("bundle root is not a directory: {}", explicit.display());
                }
                explicit
            }
            None => discover_root(cwd).unwrap_or_else(|| {
                tracing::warn!("Could not locate bundle root; using current directory");
                cwd.to_path_buf()
            }),
        };

        Ok(Self {
            root,
            pdfinfo: env(PDFINFO_ENV).unwrap_or_else(|| "pdfinfo".to_string()),
            pdftotext: env(PDFTOTEXT_ENV).unwrap_or_else(|| "pdftotext".to_string()),
            git: env(GIT_ENV).unwrap_or_else(|| "git".to_string()),
        })
    }

    pub fn pdf_tools(&self) -> PopplerTools {
        PopplerTools::new(&self.pdfinfo, &self.pdftotext)
    }

    pub fn tracked_files(&self) -> GitLsFiles {
        GitLsFiles::new(&self.git)
    }
}

/// Walk up from `start` to the first directory holding `papers/` and `site/`.
fn discover_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("papers").is_dir() && dir.join("site").is_dir())
        .map(Path::to_path_buf)
}
