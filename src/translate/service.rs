//! Translation service trait
//!
//! The service is the external collaborator that actually produces
//! translations. The build step only needs one operation from it: take the
//! source file plus job settings, report progress while working, and hand back
//! the translated files.

use crate::error::ServiceResult;
use crate::translate::data::{ProgressStatus, TranslateRequest, TranslationFile};
use async_trait::async_trait;

/// Callback invoked with progress snapshots during a translation job
pub type ProgressCallback<'a> = &'a (dyn Fn(ProgressStatus) + Send + Sync);

/// Generic trait for translation backends
///
/// Implementations handle the transport (HTTP for [`AutoglotClient`], in-memory
/// for [`MockService`]). No retry is expected at this layer.
///
/// [`AutoglotClient`]: crate::translate::AutoglotClient
/// [`MockService`]: crate::translate::MockService
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate the request's files into every target language
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<TranslationFile>)` - Translated artifacts, one or more per target language
    /// * `Err(ServiceError)` - If the service rejects or fails the job
    async fn translate(
        &self,
        request: TranslateRequest,
        on_progress: ProgressCallback<'_>,
    ) -> ServiceResult<Vec<TranslationFile>>;

    /// Name used in log lines
    fn provider_name(&self) -> &str;
}
