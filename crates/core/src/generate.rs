//! Descriptor generation over an index range.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::GenerateConfig;
use crate::descriptor::{descriptor_path, unit_name, FunctionDescriptor};

/// Error type for generator runs.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A descriptor failed to render as YAML.
    #[error("Failed to render descriptor for {unit}: {source}")]
    Render {
        unit: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A descriptor file could not be written.
    ///
    /// Covers a missing output directory as well as permission problems; the
    /// generator does not create the directory itself.
    #[error("Failed to write descriptor file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience result type for generator runs.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// What happened to one descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    /// Freshly written, or overwritten.
    Written,
    /// Left untouched: the file already existed and overwrite was disabled.
    Skipped,
}

/// Per-file record of one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub index: u32,
    pub unit: String,
    pub path: PathBuf,
    pub action: FileAction,
}

/// What one generator run did, in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateOutcome {
    pub files: Vec<FileOutcome>,
}

impl GenerateOutcome {
    pub fn written_count(&self) -> usize {
        self.files.iter().filter(|f| f.action == FileAction::Written).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().filter(|f| f.action == FileAction::Skipped).count()
    }
}

/// Write one descriptor file per index in the configured range.
///
/// Existing files are skipped (and recorded as such) unless
/// `config.overwrite` is set, in which case their content is replaced with a
/// fresh rendering. Indices are processed in ascending order; the first
/// write failure aborts the run and leaves earlier files on disk.
pub fn generate(config: &GenerateConfig) -> GenerateResult<GenerateOutcome> {
    let mut outcome = GenerateOutcome::default();

    for index in config.range.indices() {
        let unit = unit_name(index);
        let path = descriptor_path(&config.directory, index);

        if !config.overwrite && path.exists() {
            outcome.files.push(FileOutcome { index, unit, path, action: FileAction::Skipped });
            continue;
        }

        let yaml = FunctionDescriptor::for_index(index)
            .to_yaml()
            .map_err(|source| GenerateError::Render { unit: unit.clone(), source })?;

        fs::write(&path, yaml)
            .map_err(|source| GenerateError::Write { path: path.clone(), source })?;

        outcome.files.push(FileOutcome { index, unit, path, action: FileAction::Written });
    }

    Ok(outcome)
}
