#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dreams_cli::tools::{PdfTools, TrackedFiles};
use dreams_core::registry::PAPER_SPECS;
use dreams_core::{BundleLayout, IntegrityResult};
use serde_json::json;
use tempfile::TempDir;

pub const SITE_TITLE: &str = "Dreams: Endogenous-Pivot Semantics Showcase";

/// A complete, releasable bundle in a temporary directory.
pub struct Bundle {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl Bundle {
    pub fn healthy() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("dreams");
        fs::create_dir_all(&root).expect("create bundle root");
        let bundle = Self { _tmp: tmp, root };
        bundle.write_results();
        bundle.write_site();
        bundle.write_metadata();
        bundle.write_papers();
        bundle
    }

    pub fn layout(&self) -> BundleLayout {
        BundleLayout::new(&self.root)
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create parent dirs");
        fs::write(path, contents).expect("write fixture");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read fixture")
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.path(relative)).expect("remove fixture");
    }

    /// Every regular file under the root, relative, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        collect(&self.root, &self.root, &mut out);
        out.sort();
        out
    }

    fn write_results(&self) {
        let mut rows = Vec::new();
        for fraction in [1.0, 0.65, 0.5, 0.4] {
            rows.push(json!({
                "policy": "l2_guarded", "fraction": fraction,
                "pivot_preservation_rate": 1.0, "primary_full_rate": 1.0,
                "decoy_full_rate": 0.0, "contract_satisfied_rate": 1.0,
                "raw_validity": 1.0
            }));
            rows.push(json!({
                "policy": "recency", "fraction": fraction,
                "pivot_preservation_rate": if fraction == 1.0 { 1.0 } else { 0.0 },
                "primary_full_rate": if fraction == 1.0 { 1.0 } else { 0.0 },
                "decoy_full_rate": 0.8333333333333334, "contract_satisfied_rate": 0.25,
                "raw_validity": 0.97
            }));
        }
        self.write(
            "results/replay/replay_summary.json",
            &serde_json::to_string_pretty(&json!({ "summary": rows })).expect("serialize"),
        );
        self.write(
            "results/VALIDATION_SUMMARY.md",
            "# Validation\n\n============ 30 passed in 3.21s ============\n",
        );
        self.write(
            "results/certificates/memory_safety_certificate.json",
            &certificate().to_string(),
        );
    }

    fn write_site(&self) {
        let rates = |pivot: f64, contract: f64, decoy: f64| {
            json!({
                "pivot_preservation_rate": pivot, "primary_full_rate": pivot,
                "decoy_full_rate": decoy, "contract_satisfied_rate": contract
            })
        };
        let site = json!({
            "levels": [0.4, 0.5, 0.65, 1.0],
            "policies": {
                "l2_guarded": {
                    "1.0": rates(1.0, 1.0, 0.0), "0.65": rates(1.0, 1.0, 0.0),
                    "0.50": rates(1.0, 1.0, 0.0), "0.4": rates(1.0, 1.0, 0.0)
                },
                "recency": {
                    "1.0": rates(1.0, 0.25, 0.8333333333333334),
                    "0.65": rates(0.0, 0.25, 0.8333333333333334),
                    "0.5": rates(0.0, 0.25, 0.8333333333333334),
                    "0.40": rates(0.0, 0.25, 0.8333333333333334)
                }
            }
        });
        self.write("site/data_miragekit.json", &site.to_string());
        // Pretty-printed on purpose: only structure matters.
        self.write(
            "site/data_certificate.json",
            &serde_json::to_string_pretty(&certificate()).expect("serialize"),
        );
        self.write("site/index.html", "<!doctype html><title>dreams</title>\n");
        self.write("site/app.js", "fetch('./data_certificate.json');\n");
    }

    fn write_metadata(&self) {
        self.write("notebooks/README.md", "# Notebooks\n");
        self.write("tests/README.md", "# Tests\n");
        self.write("README.md", "# dreams\n\nData lives in /Users/public/data.\n");
        self.write("papers/LICENSE_CC_BY_4_0.md", "Creative Commons Attribution 4.0\n");

        let mut cff = format!(
            "cff-version: 1.2.0\nmessage: \"Please cite this work.\"\ntitle: \"{SITE_TITLE}\"\n\
             license: CC-BY-4.0\nrepository-code: \"https://github.com/jack-chaudier/dreams\"\n\
             references:\n"
        );
        for spec in PAPER_SPECS {
            cff.push_str(&format!(
                "  - type: article\n    title: \"{}\"\n    status: preprint\n",
                spec.title
            ));
        }
        self.write("CITATION.cff", &cff);

        let zenodo = json!({
            "title": SITE_TITLE,
            "upload_type": "publication",
            "publication_type": "workingpaper",
            "license": "CC-BY-4.0",
            "creators": [{"name": "Gaffney, Jack Chaudier"}],
            "related_identifiers": [
                {"identifier": "https://github.com/jack-chaudier/dreams", "relation": "isSupplementTo"}
            ]
        });
        self.write(".zenodo.json", &zenodo.to_string());
    }

    fn write_papers(&self) {
        for spec in PAPER_SPECS {
            let tex = format!(
                "\\documentclass{{article}}\n\
                 \\hypersetup{{pdftitle={{{title}}}, pdfauthor={{{author}}}, pdfsubject={{cs.AI}}}}\n\
                 \\begin{{document}}\n\
                 Working Paper (First Draft) -- \\url{{https://creativecommons.org/licenses/by/4.0/}}\n\
                 \\includegraphics[width=\\linewidth]{{figures/{key}_overview.pdf}}\n\
                 \\end{{document}}\n",
                title = spec.title,
                author = spec.author,
                key = spec.key,
            );
            self.write(spec.tex, &tex);
            self.write(&format!("papers/sources/figures/{}_overview.pdf", spec.key), "%PDF-1.5");
            self.write(spec.pdf, "%PDF-1.7\n");
        }
    }
}

pub fn certificate() -> serde_json::Value {
    json!({
        "certificate": "memory_safety",
        "claim": "l2_guarded compression never substitutes pivot identity",
        "witness": {"tropical": [0.0, 1.0, 2.5], "regret": 0.0, "fractions": [0.65, 0.5, 0.4]},
        "notes": ["replayed from results/replay", "exact equality"]
    })
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            out.push(path.strip_prefix(root).expect("under root").to_path_buf());
        }
    }
}

/// PDF tools answering from the paper registry.
pub struct FakePdfTools {
    pub pages: u32,
    pub first_page: String,
    pub overrides: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for FakePdfTools {
    fn default() -> Self {
        Self {
            pages: 12,
            first_page: "Working Paper (First Draft)\nLicensed under CC-BY 4.0\n".to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl PdfTools for FakePdfTools {
    fn metadata(&self, pdf: &Path) -> IntegrityResult<BTreeMap<String, String>> {
        let name = pdf.file_name().expect("file name").to_string_lossy().into_owned();
        if let Some(info) = self.overrides.get(&name) {
            return Ok(info.clone());
        }
        let spec = PAPER_SPECS
            .iter()
            .find(|spec| spec.pdf.ends_with(&name))
            .expect("registered pdf");
        Ok([
            ("title", spec.title.to_string()),
            ("author", spec.author.to_string()),
            ("pages", self.pages.to_string()),
            ("producer", "pdfTeX-1.40.25".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect())
    }

    fn page_text(&self, _pdf: &Path, _first: u32, _last: u32) -> IntegrityResult<String> {
        Ok(self.first_page.clone())
    }
}

/// Treats every file currently in the bundle as tracked.
pub struct AllFilesTracked;

impl TrackedFiles for AllFilesTracked {
    fn list(&self, root: &Path) -> IntegrityResult<Vec<PathBuf>> {
        let mut out = Vec::new();
        collect(root, root, &mut out);
        out.sort();
        Ok(out)
    }
}
