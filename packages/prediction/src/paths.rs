//! Canonical file locations and their environment overrides.
//!
//! Relative defaults resolve against the project root's `data/` directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the model artifact location.
pub const MODEL_PATH_ENV: &str = "CRIME_RATE_MODEL_PATH";

/// File name of the bundled model artifact inside `data/`.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the bundled model artifact path, `data/model.json`.
#[must_use]
pub fn default_model_path() -> PathBuf {
    data_dir().join(MODEL_FILE_NAME)
}

/// Returns the model path from [`MODEL_PATH_ENV`], falling back to
/// [`default_model_path`]. Empty values are ignored.
#[must_use]
pub fn model_path() -> PathBuf {
    std::env::var(MODEL_PATH_ENV)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map_or_else(default_model_path, PathBuf::from)
}
