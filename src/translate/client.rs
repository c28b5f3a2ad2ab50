//! HTTP client for the Autoglot translation API
//!
//! A job is submitted with `POST {base}/v1/translate` and then polled with
//! `GET {base}/v1/jobs/{id}` until it completes or fails. Every poll that shows
//! new progress is forwarded to the caller's progress callback.
//!
//! # Authentication
//!
//! The API key travels as a bearer token. It comes from the request, which
//! the orchestrator fills from the options or the `AUTOGLOT_API_KEY`
//! environment variable.
//!
//! # Example
//!
//! ```ignore
//! use autoglot_build::translate::{AutoglotClient, TranslationService};
//!
//! let client = AutoglotClient::new()?;
//! let files = client.translate(request, &|status| println!("{:?}", status)).await?;
//! ```

use crate::error::{ServiceError, ServiceResult};
use crate::translate::data::{ProgressStatus, TranslateRequest, TranslationFile};
use crate::translate::service::{ProgressCallback, TranslationService};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_API_URL: &str = "https://api.autoglot.app";

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    files: &'a [TranslationFile],
    target_languages: &'a [String],
    source_language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    skip_cache: bool,
}

#[derive(Debug, Deserialize)]
struct JobCreated {
    job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: JobState,
    #[serde(default)]
    total_strings: u64,
    #[serde(default)]
    completed_strings: u64,
    #[serde(default)]
    progress: u8,
    #[serde(default)]
    files: Option<Vec<TranslationFile>>,
    #[serde(default)]
    error: Option<String>,
}

/// What one poll of the job endpoint tells us
#[derive(Debug, PartialEq)]
enum JobPoll {
    InProgress(ProgressStatus),
    Done(ProgressStatus, Vec<TranslationFile>),
}

impl JobStatus {
    fn progress_status(&self) -> ProgressStatus {
        ProgressStatus::new(self.total_strings, self.completed_strings, self.progress)
    }

    fn into_poll(self) -> ServiceResult<JobPoll> {
        let status = self.progress_status();
        match self.status {
            JobState::Pending | JobState::Running => Ok(JobPoll::InProgress(status)),
            JobState::Completed => {
                let files = self.files.ok_or_else(|| {
                    ServiceError::InvalidResponse(
                        "completed job is missing 'files'".to_string(),
                    )
                })?;
                Ok(JobPoll::Done(status, files))
            }
            JobState::Failed => Err(ServiceError::JobFailed(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }
}

/// Autoglot translation API client
#[derive(Clone)]
pub struct AutoglotClient {
    client: reqwest::Client,
    /// Used when the request carries no endpoint override
    base_url: String,
    poll_interval: Duration,
}

impl AutoglotClient {
    /// Per-request HTTP timeout; the job as a whole is not bounded
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_API_URL.to_string(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn endpoint(base_url: &str, path: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), path)
    }

    /// Turn a non-success response into an `Api` error carrying the body text
    async fn check_status(response: reqwest::Response) -> ServiceResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(ServiceError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn submit(&self, base_url: &str, request: &TranslateRequest) -> ServiceResult<String> {
        let body = TranslateBody {
            files: &request.files,
            target_languages: &request.target_languages,
            source_language: &request.source_language,
            project: request.project.as_deref(),
            skip_cache: request.skip_cache,
        };

        let response = self
            .client
            .post(Self::endpoint(base_url, "v1/translate"))
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await?;

        let created: JobCreated = Self::check_status(response).await?.json().await?;
        Ok(created.job_id)
    }

    async fn poll(&self, base_url: &str, api_key: &str, job_id: &str) -> ServiceResult<JobPoll> {
        let response = self
            .client
            .get(Self::endpoint(base_url, &format!("v1/jobs/{}", job_id)))
            .bearer_auth(api_key)
            .send()
            .await?;

        let status: JobStatus = Self::check_status(response).await?.json().await?;
        status.into_poll()
    }
}

impl std::fmt::Debug for AutoglotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoglotClient")
            .field("base_url", &self.base_url)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

#[async_trait]
impl TranslationService for AutoglotClient {
    async fn translate(
        &self,
        request: TranslateRequest,
        on_progress: ProgressCallback<'_>,
    ) -> ServiceResult<Vec<TranslationFile>> {
        if request.api_key.trim().is_empty() {
            return Err(ServiceError::Config("API key cannot be empty".to_string()));
        }

        let base_url = request
            .api_url
            .clone()
            .unwrap_or_else(|| self.base_url.clone());

        let job_id = self.submit(&base_url, &request).await?;
        tracing::debug!(target: "autoglot", job_id = %job_id, "[autoglot] Job submitted");

        // Only forward progress that moved since the last poll
        let mut last_reported: Option<ProgressStatus> = None;
        let mut report = |status: ProgressStatus| {
            if last_reported != Some(status) {
                on_progress(status);
                last_reported = Some(status);
            }
        };

        loop {
            match self.poll(&base_url, &request.api_key, &job_id).await? {
                JobPoll::InProgress(status) => report(status),
                JobPoll::Done(status, files) => {
                    report(status);
                    return Ok(files);
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    fn provider_name(&self) -> &str {
        "Autoglot API"
    }
}
