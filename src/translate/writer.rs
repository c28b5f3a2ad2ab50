//! Writes translated files to disk
//!
//! Files land relative to a base directory (the directory of the source locale
//! file). Writes are not transactional: the first failure stops the batch and
//! files written before it stay on disk.

use crate::error::{AutoglotError, Result};
use crate::translate::data::TranslationFile;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Write every file under `base_dir`, creating parent directories as needed
///
/// Existing files are overwritten. Returns the written paths in input order.
///
/// # Errors
/// - `InvalidOutputPath` if a filename is absolute or climbs out of `base_dir`
/// - `Write` for any filesystem failure (permissions, disk full, ...)
pub async fn write_files(files: &[TranslationFile], base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let out_path = resolve_output_path(base_dir, &file.filename)?;

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| AutoglotError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&out_path, file.content.to_text())
            .await
            .map_err(|source| AutoglotError::Write {
                path: out_path.clone(),
                source,
            })?;

        written.push(out_path);
    }

    Ok(written)
}

/// Join a service-provided filename onto the base directory
///
/// Only plain relative paths are accepted; `..`, root and prefix components
/// are rejected so a response can never write outside `base_dir`.
pub fn resolve_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    let relative = Path::new(filename);
    if filename.is_empty() {
        return Err(AutoglotError::InvalidOutputPath(filename.to_string()));
    }

    let mut out_path = base_dir.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => out_path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(AutoglotError::InvalidOutputPath(filename.to_string()));
            }
        }
    }

    Ok(out_path)
}
