//! Translation orchestration
//!
//! Runs one translation job end to end: resolve credentials, read the source
//! locale file, call the translation service with progress reporting and
//! write the results next to the source file.
//!
//! A build must never fail because translation is not configured or the
//! service is down, so `run` does not return an error. Every failure is logged
//! and summarized in a [`RunOutcome`]. The one exception is an output-write
//! failure, which [`RunOutcome::into_hook_result`] hands back to the host build.

use crate::config::{API_KEY_ENV, API_URL_ENV, AutoglotOptions};
use crate::error::{AutoglotError, Result};
use crate::translate::data::{ProgressStatus, TranslateRequest, TranslationFile};
use crate::translate::detect::detect_source_language;
use crate::translate::service::TranslationService;
use crate::translate::writer::{resolve_output_path, write_files};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Reads an environment variable; swapped out in tests
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Receives each progress line; logs at info level unless replaced
pub type ProgressSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Summary of one orchestrator run
#[derive(Debug)]
pub enum RunOutcome {
    /// Translation succeeded; these paths were written, in service order
    Written(Vec<PathBuf>),
    /// Nothing was sent to the service (missing API key, bad options, unreadable source)
    Skipped(AutoglotError),
    /// The service failed the job or returned unusable files; nothing was written
    Failed(AutoglotError),
    /// Writing the results failed part way; earlier files stay on disk
    WriteFailed(AutoglotError),
}

impl RunOutcome {
    pub fn files_written(&self) -> usize {
        match self {
            RunOutcome::Written(paths) => paths.len(),
            _ => 0,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Written(_))
    }

    pub fn error(&self) -> Option<&AutoglotError> {
        match self {
            RunOutcome::Written(_) => None,
            RunOutcome::Skipped(err) | RunOutcome::Failed(err) | RunOutcome::WriteFailed(err) => {
                Some(err)
            }
        }
    }

    /// What the host build should see
    ///
    /// Only output-write failures fail the build; everything else has already
    /// been logged and is reported as success.
    pub fn into_hook_result(self) -> Result<()> {
        match self {
            RunOutcome::WriteFailed(err) => Err(err),
            _ => Ok(()),
        }
    }
}

/// Progress log line for a status, or `None` for jobs with no strings
pub fn progress_line(status: &ProgressStatus) -> Option<String> {
    if status.total_strings == 0 {
        return None;
    }
    Some(format!(
        "[autoglot] {}/{} strings ({}%)",
        status.completed_strings, status.total_strings, status.progress
    ))
}

/// Coordinates one translation run for a fixed set of options
///
/// Not re-entrant by itself; wrap it in a
/// [`RunOnce`](crate::build::RunOnce) to share it between hooks.
#[derive(Clone)]
pub struct Orchestrator {
    options: Arc<AutoglotOptions>,
    service: Arc<dyn TranslationService>,
    env: EnvLookup,
    progress: ProgressSink,
}

impl Orchestrator {
    pub fn new(options: AutoglotOptions, service: Arc<dyn TranslationService>) -> Self {
        Self {
            options: Arc::new(options),
            service,
            env: Arc::new(|name| std::env::var(name).ok()),
            progress: Arc::new(|line| info!(target: "autoglot", "{}", line)),
        }
    }

    /// Replace the process environment with a custom lookup
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    /// Send progress lines somewhere other than the log
    pub fn with_progress_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.progress = Arc::new(sink);
        self
    }

    pub fn options(&self) -> &AutoglotOptions {
        &self.options
    }

    /// Run the translation job and report the outcome through logging
    pub async fn run(&self) -> RunOutcome {
        let outcome = self.try_run().await;
        match &outcome {
            RunOutcome::Written(paths) => {
                info!(target: "autoglot", "[autoglot] Done — {} file(s) written.", paths.len());
            }
            RunOutcome::Skipped(err) => {
                error!(target: "autoglot", "[autoglot] {}", err);
            }
            RunOutcome::Failed(err) => {
                error!(target: "autoglot", "[autoglot] Translation failed: {}", err);
            }
            RunOutcome::WriteFailed(err) => {
                error!(target: "autoglot", "[autoglot] Failed to write translations: {}", err);
            }
        }
        outcome
    }

    async fn try_run(&self) -> RunOutcome {
        let opts = &self.options;

        let Some(api_key) = opts.resolve_api_key((self.env)(API_KEY_ENV)) else {
            return RunOutcome::Skipped(AutoglotError::MissingApiKey);
        };

        if let Err(err) = opts.validate() {
            return RunOutcome::Skipped(err);
        }
        for warning in opts.language_warnings() {
            warn!(target: "autoglot", "[autoglot] {}", warning);
        }

        let api_url = opts.resolve_api_url((self.env)(API_URL_ENV));

        let source_path = absolute_path(&opts.source);
        let filename = source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_language = opts
            .source_language
            .clone()
            .unwrap_or_else(|| detect_source_language(&filename));

        let content = match tokio::fs::read_to_string(&source_path).await {
            Ok(content) => content,
            Err(source) => {
                return RunOutcome::Skipped(AutoglotError::SourceRead {
                    path: source_path,
                    source,
                });
            }
        };

        info!(
            target: "autoglot",
            "[autoglot] Translating {} into {}...",
            filename,
            opts.lang.join(", ")
        );
        debug!(
            target: "autoglot",
            provider = self.service.provider_name(),
            source_language = %source_language,
            skip_cache = opts.skip_cache,
            "[autoglot] Calling translation service"
        );

        let request = TranslateRequest {
            files: vec![TranslationFile::new(&filename, content)],
            target_languages: opts.lang.clone(),
            source_language,
            api_key,
            api_url,
            project: opts.project.clone(),
            skip_cache: opts.skip_cache,
        };

        let sink = self.progress.clone();
        let report_progress = move |status: ProgressStatus| {
            if let Some(line) = progress_line(&status) {
                sink(&line);
            }
        };
        let files = match self.service.translate(request, &report_progress).await {
            Ok(files) => files,
            Err(err) => return RunOutcome::Failed(err.into()),
        };

        // A filename that escapes the output directory is a bad response, not
        // a filesystem failure; reject the whole batch before writing.
        let output_dir = source_path.parent().unwrap_or_else(|| Path::new("."));
        for file in &files {
            if let Err(err) = resolve_output_path(output_dir, &file.filename) {
                return RunOutcome::Failed(err);
            }
        }

        match write_files(&files, output_dir).await {
            Ok(paths) => RunOutcome::Written(paths),
            Err(err) => RunOutcome::WriteFailed(err),
        }
    }
}

/// Resolve against the working directory without touching the file itself
fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
