//! Certificate sync: the site copy must be structurally identical to the
//! canonical certificate under `results/`.

use serde_json::{Number, Value};

use dreams_core::{load_json, BundleLayout, IntegrityResult, IntegrityViolation};

pub fn check_certificate_sync(layout: &BundleLayout) -> IntegrityResult<()> {
    let source: Value = load_json(&layout.certificate())?;
    let site: Value = load_json(&layout.site_certificate())?;
    compare(&source, &site)
}

pub(crate) fn compare(source: &Value, site: &Value) -> IntegrityResult<()> {
    let Some(at) = first_difference(source, site, String::new()) else {
        return Ok(());
    };
    let at = if at.is_empty() { "/" } else { at.as_str() };
    Err(IntegrityViolation::condition(format!(
        "Site certificate JSON is out of sync with results certificate (first difference at {at})"
    )))
}

/// JSON Pointer of the first location where the two documents disagree.
fn first_difference(lhs: &Value, rhs: &Value, pointer: String) -> Option<String> {
    match (lhs, rhs) {
        (Value::Object(a), Value::Object(b)) => {
            let mut keys: Vec<&String> = a.keys().chain(b.keys()).collect();
            keys.sort();
            keys.dedup();
            keys.into_iter().find_map(|key| {
                let child = format!("{pointer}/{}", escape(key));
                match (a.get(key), b.get(key)) {
                    (Some(x), Some(y)) => first_difference(x, y, child),
                    _ => Some(child),
                }
            })
        }
        (Value::Array(a), Value::Array(b)) => {
            let common = a
                .iter()
                .zip(b)
                .enumerate()
                .find_map(|(i, (x, y))| first_difference(x, y, format!("{pointer}/{i}")));
            match common {
                Some(found) => Some(found),
                None if a.len() != b.len() => Some(format!("{pointer}/{}", a.len().min(b.len()))),
                None => None,
            }
        }
        (Value::Number(a), Value::Number(b)) if numbers_equal(a, b) => None,
        _ if lhs == rhs => None,
        _ => Some(pointer),
    }
}

/// Numeric equality across integer and float representations: `1` matches `1.0`.
#[allow(clippy::float_cmp)]
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
}

fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
