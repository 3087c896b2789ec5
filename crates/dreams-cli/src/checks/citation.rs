//! Citation and deposit metadata cross-reference.
//!
//! `.zenodo.json` and `CITATION.cff` must agree on title, license and
//! repository, and the citation file must reference every paper as a
//! preprint.

use regex_lite::Regex;
use serde_json::Value;

use dreams_core::registry::citation::{
    CFF_LICENSE_LINE, CFF_TITLE_PATTERN, LICENSE_ID, MIN_PREPRINT_REFS, PREPRINT_PATTERN,
    PUBLICATION_TYPE, REPOSITORY_URL, UPLOAD_TYPE,
};
use dreams_core::{ensure, load_json, read_text, BundleLayout, IntegrityResult};

use super::papers::compile;

pub fn check_citation_metadata(layout: &BundleLayout) -> IntegrityResult<()> {
    let zenodo: Value = load_json(&layout.zenodo())?;
    let cff = read_text(&layout.citation())?;
    cross_reference(&zenodo, &cff)
}

pub(crate) fn cross_reference(zenodo: &Value, cff: &str) -> IntegrityResult<()> {
    let field = |name: &str| zenodo.get(name).and_then(Value::as_str);

    expect_field(field("upload_type"), "upload_type", UPLOAD_TYPE)?;
    expect_field(field("publication_type"), "publication_type", PUBLICATION_TYPE)?;
    expect_field(field("license"), "license", LICENSE_ID)?;
    ensure(cff.contains(CFF_LICENSE_LINE), || {
        format!("CITATION.cff license must be {LICENSE_ID}")
    })?;

    let title_re = compile(CFF_TITLE_PATTERN)?;
    let cff_title = title_re
        .captures(cff)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    ensure(cff_title.is_some(), || {
        "CITATION.cff missing top-level title".to_string()
    })?;
    ensure(field("title") == cff_title, || {
        format!(
            "CITATION.cff and .zenodo.json titles must match: {:?} != {:?}",
            cff_title.unwrap_or_default(),
            field("title").unwrap_or_default()
        )
    })?;

    let repository_line = format!("repository-code: \"{REPOSITORY_URL}\"");
    ensure(cff.contains(&repository_line), || {
        format!("CITATION.cff repository-code must reference {REPOSITORY_URL}")
    })?;
    let related = zenodo
        .get("related_identifiers")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .any(|item| item.get("identifier").and_then(Value::as_str) == Some(REPOSITORY_URL))
        })
        .unwrap_or(false);
    ensure(related, || {
        format!("Zenodo related_identifiers must include {REPOSITORY_URL}")
    })?;

    let preprints = count_matches(&compile(PREPRINT_PATTERN)?, cff);
    ensure(preprints >= MIN_PREPRINT_REFS, || {
        format!(
            "CITATION.cff should include references to papers 1/2/3/I as preprints \
             (found {preprints}, need {MIN_PREPRINT_REFS})"
        )
    })
}

fn expect_field(actual: Option<&str>, name: &str, expected: &str) -> IntegrityResult<()> {
    ensure(actual == Some(expected), || {
        format!(
            "Zenodo {name} must be {expected} (found {})",
            actual.map_or_else(|| "nothing".to_string(), |v| format!("\"{v}\""))
        )
    })
}

fn count_matches(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}
