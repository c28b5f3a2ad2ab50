//! Core data structures exchanged with the translation service
//!
//! A single [`TranslationFile`] goes out (the source locale file) and one or
//! more come back (the translated artifacts). Progress reports arrive as
//! [`ProgressStatus`] snapshots while the job runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content of a locale file
///
/// The service may hand back either raw text or an already-parsed JSON
/// document. JSON content is pretty-printed when written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationContent {
    Text(String),
    Json(Value),
}

impl TranslationContent {
    /// Render the content as UTF-8 text
    ///
    /// Text is returned verbatim. JSON is serialized with 2-space indentation;
    /// object keys come out sorted, so the output is stable across runs.
    pub fn to_text(&self) -> String {
        match self {
            TranslationContent::Text(text) => text.clone(),
            // Serializing a Value cannot fail: all map keys are strings.
            TranslationContent::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<String> for TranslationContent {
    fn from(text: String) -> Self {
        TranslationContent::Text(text)
    }
}

impl From<&str> for TranslationContent {
    fn from(text: &str) -> Self {
        TranslationContent::Text(text.to_string())
    }
}

impl From<Value> for TranslationContent {
    fn from(value: Value) -> Self {
        TranslationContent::Json(value)
    }
}

/// A locale file, either the source sent to the service or a translated artifact
///
/// `filename` is always relative. Translated files are resolved against the
/// directory of the source file, so a service may return `fr.json` or
/// `fr/messages.json` alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationFile {
    pub filename: String,
    pub content: TranslationContent,
}

impl TranslationFile {
    pub fn new(filename: &str, content: impl Into<TranslationContent>) -> Self {
        Self {
            filename: filename.to_string(),
            content: content.into(),
        }
    }
}

/// Snapshot of how far a translation job has progressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStatus {
    pub total_strings: u64,
    pub completed_strings: u64,
    /// Percentage, 0 to 100
    pub progress: u8,
}

impl ProgressStatus {
    pub fn new(total_strings: u64, completed_strings: u64, progress: u8) -> Self {
        Self {
            total_strings,
            completed_strings,
            progress,
        }
    }
}

/// Everything the service needs for one translation job
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateRequest {
    pub files: Vec<TranslationFile>,
    pub target_languages: Vec<String>,
    pub source_language: String,
    pub api_key: String,
    /// Endpoint override; the provider's default is used when `None`
    pub api_url: Option<String>,
    pub project: Option<String>,
    pub skip_cache: bool,
}
