//! Structural checks: required files exist, and the public bundle is fully
//! self-contained (no symlinks anywhere under the published directories).

use std::path::{Path, PathBuf};

use dreams_core::registry::{PUBLIC_BUNDLE_DIRS, REQUIRED_PATHS};
use dreams_core::{ensure, BundleLayout, IntegrityResult, IntegrityViolation};

pub fn check_structure(layout: &BundleLayout) -> IntegrityResult<()> {
    for relative in REQUIRED_PATHS {
        ensure(layout.join(relative).exists(), || format!("{relative} missing"))?;
    }
    Ok(())
}

pub fn check_no_symlinks(layout: &BundleLayout) -> IntegrityResult<()> {
    for dir in PUBLIC_BUNDLE_DIRS {
        let root = layout.join(dir);
        if root.is_dir() {
            walk_for_symlinks(&root)?;
        }
    }
    Ok(())
}

/// Depth-first, sorted walk that never follows links.
fn walk_for_symlinks(dir: &Path) -> IntegrityResult<()> {
    for path in sorted_entries(dir)? {
        let meta = std::fs::symlink_metadata(&path).map_err(|source| IntegrityViolation::Io {
            path: path.clone(),
            source,
        })?;
        ensure(!meta.file_type().is_symlink(), || {
            format!("Symlink not allowed in public bundle: {}", path.display())
        })?;
        if meta.is_dir() {
            walk_for_symlinks(&path)?;
        }
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> IntegrityResult<Vec<PathBuf>> {
    let io_error = |source| IntegrityViolation::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = std::fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    paths.sort();
    Ok(paths)
}
