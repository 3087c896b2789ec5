//! # Artifact Documents
//!
//! Typed views over the JSON artifacts read by the checks, plus the file
//! loading helpers that map I/O and parse failures into
//! [`IntegrityViolation`]s naming the offending path.
//!
//! Documents are loaded fresh on every call. Nothing is cached between
//! checks, so two runs over an unchanged tree see identical inputs.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::error::{IntegrityResult, IntegrityViolation};

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> IntegrityResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IntegrityViolation::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            IntegrityViolation::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Read and deserialize a JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> IntegrityResult<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| IntegrityViolation::MalformedJson {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Fractions
// ---------------------------------------------------------------------------

/// A retention fraction, normalized through float parsing.
///
/// Two sources may serialize the same fraction with different precision
/// (`"0.5"` vs `"0.50"`); [`Fraction::key`] gives both the same string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fraction(f64);

impl Fraction {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Parse textual fractions such as site mirror object keys.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Shortest round-trip text, always with a decimal point (`1.0`, `0.65`).
    pub fn key(self) -> String {
        format!("{:?}", self.0)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        number_or_numeric_string(deserializer).map(Self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// Accept `0.5` and `"0.5"` alike.
fn number_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, found \"{s}\""))),
    }
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// The four outcome metrics recorded per (policy, fraction).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RateRecord {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub pivot_preservation_rate: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub primary_full_rate: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub decoy_full_rate: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub contract_satisfied_rate: f64,
}

impl RateRecord {
    /// Every rate paired with its field name, in a fixed order.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("pivot_preservation_rate", self.pivot_preservation_rate),
            ("primary_full_rate", self.primary_full_rate),
            ("decoy_full_rate", self.decoy_full_rate),
            ("contract_satisfied_rate", self.contract_satisfied_rate),
        ]
    }
}

// ---------------------------------------------------------------------------
// Replay summary
// ---------------------------------------------------------------------------

/// `results/replay/replay_summary.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaySummary {
    pub summary: Vec<ReplayRow>,
}

/// One row of the replay summary. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayRow {
    pub policy: String,
    pub fraction: Fraction,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub pivot_preservation_rate: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub primary_full_rate: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub decoy_full_rate: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub contract_satisfied_rate: f64,
}

impl ReplayRow {
    pub fn rates(&self) -> RateRecord {
        RateRecord {
            pivot_preservation_rate: self.pivot_preservation_rate,
            primary_full_rate: self.primary_full_rate,
            decoy_full_rate: self.decoy_full_rate,
            contract_satisfied_rate: self.contract_satisfied_rate,
        }
    }
}

/// Lookup key: policy name plus normalized fraction text.
pub type RowKey = (String, String);

impl ReplaySummary {
    pub fn load(path: &Path) -> IntegrityResult<Self> {
        load_json(path)
    }

    /// Index rows by `(policy, fraction key)`. A later duplicate replaces an
    /// earlier one.
    pub fn index(&self) -> HashMap<RowKey, &ReplayRow> {
        self.summary
            .iter()
            .map(|row| ((row.policy.clone(), row.fraction.key()), row))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Site mirror
// ---------------------------------------------------------------------------

/// `site/data_miragekit.json`: policy → fraction text → rates.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteMirror {
    pub policies: BTreeMap<String, BTreeMap<String, RateRecord>>,
}

impl SiteMirror {
    pub fn load(path: &Path) -> IntegrityResult<Self> {
        load_json(path)
    }
}
