//! Options for the autoglot build step
//!
//! Options are built once, either in code with the `with_*` builder methods or
//! from a JSON file that uses the same camelCase keys as the JavaScript options
//! object (`sourceLanguage`, `apiKey`, `apiUrl`, `skipCache`).

use crate::error::{AutoglotError, Result};
use icu_locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "AUTOGLOT_API_KEY";

/// Environment variable consulted when no API url is configured
pub const API_URL_ENV: &str = "AUTOGLOT_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoglotOptions {
    /// Path to the source locale file, e.g. `src/locales/en.json`
    pub source: PathBuf,
    /// Target languages in the order they are sent to the service
    pub lang: Vec<String>,
    /// Source language; detected from the file name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Glossary and style guide scope in `owner/repo` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub skip_cache: bool,
}

impl AutoglotOptions {
    pub fn new(source: impl Into<PathBuf>, lang: &[&str]) -> Self {
        AutoglotOptions {
            source: source.into(),
            lang: lang.iter().map(|l| l.to_string()).collect(),
            source_language: None,
            api_key: None,
            api_url: None,
            project: None,
            skip_cache: false,
        }
    }

    pub fn with_source_language(mut self, language: &str) -> Self {
        self.source_language = Some(language.to_string());
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.to_string());
        self
    }

    pub fn with_project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn with_skip_cache(mut self, skip_cache: bool) -> Self {
        self.skip_cache = skip_cache;
        self
    }

    /// Load options from a JSON file
    ///
    /// # Errors
    /// - File not found or unreadable
    /// - Invalid JSON or missing required keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutoglotError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AutoglotError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Check the options before any I/O is attempted
    ///
    /// Only the shape is checked here: the source path must be set and the
    /// target list must be non-empty. Language codes are left to the service;
    /// see [`language_warnings`](Self::language_warnings).
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(AutoglotError::Config(
                "source path must not be empty".to_string(),
            ));
        }

        if self.lang.is_empty() {
            return Err(AutoglotError::Config(
                "at least one target language is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Target codes that are not well-formed BCP 47 tags or appear twice
    ///
    /// The targets are still sent as given; these are only worth a warning.
    pub fn language_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();
        for code in &self.lang {
            if let Err(e) = Locale::try_from_str(code) {
                warnings.push(format!("'{}' is not a BCP 47 language tag: {}", code, e));
            }
            if !seen.insert(code.as_str()) {
                warnings.push(format!("target language '{}' is listed more than once", code));
            }
        }
        warnings
    }

    /// Explicit API key if it is not blank, otherwise the environment value
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        non_blank(self.api_key.clone()).or_else(|| non_blank(env_value))
    }

    /// Explicit API url if it is not blank, otherwise the environment value
    pub fn resolve_api_url(&self, env_value: Option<String>) -> Option<String> {
        non_blank(self.api_url.clone()).or_else(|| non_blank(env_value))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
