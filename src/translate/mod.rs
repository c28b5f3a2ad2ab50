/// Translation Module
///
/// Everything needed to turn one source locale file into translated sibling
/// files: language detection, the translation service boundary (HTTP client
/// and mock), the orchestrator that drives a job and the writer that puts the
/// results on disk.
///
/// # Example
///
/// ```ignore
/// use autoglot_build::AutoglotOptions;
/// use autoglot_build::translate::{AutoglotClient, Orchestrator};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let options = AutoglotOptions::new("src/locales/en.json", &["es", "fr"]);
///     let orchestrator = Orchestrator::new(options, Arc::new(AutoglotClient::new()?));
///
///     let outcome = orchestrator.run().await;
///     println!("{} file(s) written", outcome.files_written());
///     Ok(())
/// }
/// ```
pub mod client;
pub mod data;
pub mod detect;
pub mod mock;
pub mod orchestrator;
pub mod service;
pub mod writer;

pub use client::{AutoglotClient, DEFAULT_API_URL};
pub use data::{ProgressStatus, TranslateRequest, TranslationContent, TranslationFile};
pub use detect::{DEFAULT_SOURCE_LANGUAGE, detect_source_language};
pub use mock::{MockMode, MockService};
pub use orchestrator::{EnvLookup, Orchestrator, ProgressSink, RunOutcome, progress_line};
pub use service::{ProgressCallback, TranslationService};
pub use writer::{resolve_output_path, write_files};
