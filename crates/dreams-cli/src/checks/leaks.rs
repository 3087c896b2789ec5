//! Private-path leak scanner.
//!
//! Scans every version-controlled text file for substrings that would expose
//! private working directories. The registry source that declares the tokens
//! is skipped so the checker never flags itself.

use std::path::Path;

use dreams_core::registry::{FORBIDDEN_TOKENS, REGISTRY_SOURCE, TEXT_SUFFIXES};
use dreams_core::{read_text, BundleLayout, IntegrityResult, IntegrityViolation};

use crate::tools::TrackedFiles;

pub fn check_private_path_leaks(
    layout: &BundleLayout,
    tracked: &dyn TrackedFiles,
) -> IntegrityResult<()> {
    let listed = tracked.list(layout.root())?;
    let mut scanned = 0usize;

    for relative in &listed {
        if is_registry_source(relative) || !is_text_file(relative) {
            continue;
        }
        let path = layout.join(relative);
        if !path.exists() {
            continue;
        }
        let text = read_text(&path)?;
        scan_text(&path, &text, FORBIDDEN_TOKENS)?;
        scanned += 1;
    }

    tracing::debug!(tracked = listed.len(), scanned, "leak scan complete");
    Ok(())
}

/// Fail on the first forbidden token found in `text`.
pub fn scan_text(path: &Path, text: &str, forbidden: &[&str]) -> IntegrityResult<()> {
    match forbidden.iter().find(|token| text.contains(*token)) {
        Some(token) => Err(IntegrityViolation::condition(format!(
            "Forbidden private path reference in {}: {token}",
            path.display()
        ))),
        None => Ok(()),
    }
}

/// Text-like suffix, compared case-insensitively.
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            TEXT_SUFFIXES.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// The registry source may be vendored at any depth inside the bundle.
fn is_registry_source(relative: &Path) -> bool {
    relative.ends_with(REGISTRY_SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Listed(Vec<&'static str>);

    impl TrackedFiles for Listed {
        fn list(&self, _root: &Path) -> IntegrityResult<Vec<PathBuf>> {
            Ok(self.0.iter().map(PathBuf::from).collect())
        }
    }

    fn private_notes() -> String {
        format!("see /Users/{}/mirage/notes.txt for details", "jackg")
    }

    #[test]
    fn private_home_path_fails() {
        let err = scan_text(Path::new("README.md"), &private_notes(), FORBIDDEN_TOKENS).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("README.md"), "{msg}");
        assert!(msg.contains("mirage"), "{msg}");
    }

    #[test]
    fn public_path_passes() {
        scan_text(Path::new("README.md"), "data in /Users/public/data", FORBIDDEN_TOKENS).unwrap();
    }

    #[test]
    fn sibling_checkout_reference_fails() {
        let text = format!("import from ..{}mirage/loader", '/');
        assert!(scan_text(Path::new("a.py"), &text, FORBIDDEN_TOKENS).is_err());
    }

    #[test]
    fn text_suffixes_are_case_insensitive() {
        assert!(is_text_file(Path::new("papers/sources/refs.BIB")));
        assert!(is_text_file(Path::new(".zenodo.json")));
        assert!(!is_text_file(Path::new("papers/paper_01.pdf")));
        assert!(!is_text_file(Path::new("Makefile")));
    }

    #[test]
    fn registry_source_is_skipped_at_any_depth() {
        assert!(is_registry_source(Path::new(REGISTRY_SOURCE)));
        assert!(is_registry_source(&Path::new("tools/validator").join(REGISTRY_SOURCE)));
        assert!(!is_registry_source(Path::new("registry.rs")));
    }

    #[test]
    fn scans_only_tracked_text_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.md"), "clean").unwrap();
        std::fs::write(dir.path().join("blob.bin"), private_notes()).unwrap();
        std::fs::write(dir.path().join("untracked.md"), private_notes()).unwrap();
        let layout = BundleLayout::new(dir.path());

        let tracked = Listed(vec!["notes.md", "blob.bin", "deleted.md"]);
        check_private_path_leaks(&layout, &tracked).unwrap();

        let tracked = Listed(vec!["notes.md", "untracked.md"]);
        let err = check_private_path_leaks(&layout, &tracked).unwrap_err();
        assert!(err.to_string().contains("untracked.md"));
    }

    #[test]
    fn registry_copy_inside_bundle_is_not_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let vendored = dir.path().join(REGISTRY_SOURCE);
        std::fs::create_dir_all(vendored.parent().unwrap()).unwrap();
        std::fs::write(&vendored, private_notes()).unwrap();

        let tracked = Listed(vec![REGISTRY_SOURCE]);
        check_private_path_leaks(&BundleLayout::new(dir.path()), &tracked).unwrap();
    }

    #[test]
    fn leak_in_tracked_non_ascii_name_is_caught() {
        use crate::tools::{run_command, GitLsFiles};

        let git_ok = std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        if !git_ok {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        run_command("git", &["init", "-q"], Some(dir.path())).unwrap();
        std::fs::write(dir.path().join("notes café.md"), private_notes()).unwrap();
        run_command("git", &["add", "--", "notes café.md"], Some(dir.path())).unwrap();

        let err = check_private_path_leaks(&BundleLayout::new(dir.path()), &GitLsFiles::new("git"))
            .unwrap_err();
        assert!(err.to_string().contains("notes café.md"), "{err}");
    }
}
