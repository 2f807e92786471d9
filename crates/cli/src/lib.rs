use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve a `--directory` flag to an absolute path.
///
/// Canonicalizes when the directory already exists; otherwise joins it onto
/// the current working directory so error messages still name a full path.
/// The directory is never created here — the generator requires it to exist
/// and the driver treats every descriptor under a missing directory as
/// absent.
pub fn resolve_directory(directory: &str) -> Result<PathBuf> {
    let path = Path::new(directory);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}
