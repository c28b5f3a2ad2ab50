//! Post-compile translation step for web-application builds
//!
//! After the host build has compiled, the source locale file is sent to the
//! Autoglot translation service and the translated files are written next to
//! it. The step runs exactly once per build, whichever of the host's two hook
//! mechanisms fires, and never fails the build unless the output cannot be
//! written.
//!
//! # Example
//!
//! ```ignore
//! use autoglot_build::{AutoglotOptions, with_autoglot};
//! use autoglot_build::build::HostConfig;
//!
//! let options = AutoglotOptions::new("src/locales/en.json", &["es", "fr", "de"])
//!     .with_project("acme/my-app");
//! let config = with_autoglot(options).apply(HostConfig::default());
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod translate;

pub use build::{RunOnce, WithAutoglot, with_autoglot};
pub use config::{API_KEY_ENV, API_URL_ENV, AutoglotOptions};
pub use error::{AutoglotError, Result, ServiceError, ServiceResult};
pub use translate::{
    AutoglotClient, Orchestrator, ProgressStatus, RunOutcome, TranslationContent,
    TranslationFile, TranslationService, detect_source_language,
};
