//! Mock translation service for testing
//!
//! Deterministic, API-free stand-in for the translation service. It counts
//! calls and remembers the last request so tests can assert that the network
//! was (or was not) reached.
//!
//! # Example
//!
//! ```ignore
//! use autoglot_build::translate::{MockMode, MockService};
//!
//! let mock = MockService::new(MockMode::Suffix);
//! // en.json {"hi": "Hello"} translated to fr → fr.json {"hi": "Hello_fr"}
//! ```

use crate::error::{ServiceError, ServiceResult};
use crate::translate::data::{
    ProgressStatus, TranslateRequest, TranslationContent, TranslationFile,
};
use crate::translate::service::{ProgressCallback, TranslationService};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// One `<lang>.<ext>` file per target; every string value gets a `_<lang>` suffix
    Suffix,

    /// Return these files as-is, whatever the request
    Files(Vec<TranslationFile>),

    /// Simulate a service failure
    Error(String),
}

/// Mock translation service
///
/// Clones share the call counter and the recorded request.
#[derive(Debug, Clone)]
pub struct MockService {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<TranslateRequest>>>,
}

impl MockService {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockService whose every call sleeps for `delay_ms` first
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of times `translate` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TranslateRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn suffix_translate(request: &TranslateRequest) -> Vec<TranslationFile> {
        let mut out = Vec::new();
        for file in &request.files {
            let extension = Path::new(&file.filename)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext))
                .unwrap_or_default();

            for lang in &request.target_languages {
                let content = match &file.content {
                    TranslationContent::Text(text) => match serde_json::from_str::<Value>(text) {
                        Ok(value) => TranslationContent::Json(suffix_strings(value, lang)),
                        Err(_) => TranslationContent::Text(format!("{}_{}", text, lang)),
                    },
                    TranslationContent::Json(value) => {
                        TranslationContent::Json(suffix_strings(value.clone(), lang))
                    }
                };
                out.push(TranslationFile {
                    filename: format!("{}{}", lang, extension),
                    content,
                });
            }
        }
        out
    }
}

fn suffix_strings(value: Value, lang: &str) -> Value {
    match value {
        Value::String(s) => Value::String(format!("{}_{}", s, lang)),
        Value::Array(items) => Value::Array(items.into_iter().map(|v| suffix_strings(v, lang)).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, suffix_strings(v, lang)))
                .collect(),
        ),
        other => other,
    }
}

fn count_strings(content: &TranslationContent) -> u64 {
    fn count(value: &Value) -> u64 {
        match value {
            Value::String(_) => 1,
            Value::Array(items) => items.iter().map(count).sum(),
            Value::Object(map) => map.values().map(count).sum(),
            _ => 0,
        }
    }

    match content {
        TranslationContent::Text(text) => serde_json::from_str::<Value>(text)
            .map(|v| count(&v))
            .unwrap_or(1),
        TranslationContent::Json(value) => count(value),
    }
}

#[async_trait]
impl TranslationService for MockService {
    async fn translate(
        &self,
        request: TranslateRequest,
        on_progress: ProgressCallback<'_>,
    ) -> ServiceResult<Vec<TranslationFile>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let files = match &self.mode {
            MockMode::Suffix => Self::suffix_translate(&request),
            MockMode::Files(files) => files.clone(),
            MockMode::Error(msg) => return Err(ServiceError::JobFailed(msg.clone())),
        };

        // One progress report per finished target language
        let per_language: u64 = request.files.iter().map(|f| count_strings(&f.content)).sum();
        let targets = request.target_languages.len() as u64;
        let total = per_language * targets;
        for done in 1..=targets {
            let completed = per_language * done;
            let progress = if total == 0 {
                100
            } else {
                (completed * 100 / total) as u8
            };
            on_progress(ProgressStatus::new(total, completed, progress));
        }

        Ok(files)
    }

    fn provider_name(&self) -> &str {
        "Mock Service"
    }
}
