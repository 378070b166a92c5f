//! Result types returned by the translator

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Named metadata categories → raw sub-structure, `None` when absent
pub type ExtraData = BTreeMap<String, Option<Value>>;

/// One segment of an RPC translation with its alternative renderings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedPart {
    pub text: String,
    pub candidates: Vec<String>,
}

impl TranslatedPart {
    pub fn new(text: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            text: text.into(),
            candidates,
        }
    }
}

/// A finished translation
///
/// `parts` and `origin_pronunciation` are only filled by the RPC endpoint;
/// results decoded from the simple endpoint leave them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Source language, `"auto"` when it could not be resolved
    pub src: String,
    pub dest: String,
    /// The input text
    pub origin: String,
    /// The translated text
    pub text: String,
    pub pronunciation: Option<String>,
    pub origin_pronunciation: Option<String>,
    pub parts: Vec<TranslatedPart>,
    pub extra_data: ExtraData,
}

impl TranslationResult {
    /// Stand-in for a failed call when the client degrades gracefully
    ///
    /// The input text doubles as its own translation.
    pub fn placeholder(origin: &str, src: &str, dest: &str) -> Self {
        Self {
            src: src.to_string(),
            dest: dest.to_string(),
            origin: origin.to_string(),
            text: origin.to_string(),
            pronunciation: None,
            origin_pronunciation: None,
            parts: Vec::new(),
            extra_data: ExtraData::new(),
        }
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Translated(src={}, dest={}, text={}, pronunciation={})",
            self.src,
            self.dest,
            self.text,
            self.pronunciation.as_deref().unwrap_or("None")
        )
    }
}

/// A detected language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detected code; `"auto"` or empty when detection stayed unresolved
    pub lang: String,
    pub confidence: Option<f64>,
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.confidence {
            Some(confidence) => write!(f, "Detected(lang={}, confidence={})", self.lang, confidence),
            None => write!(f, "Detected(lang={}, confidence=None)", self.lang),
        }
    }
}
