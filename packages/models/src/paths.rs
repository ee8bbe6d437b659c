#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the raw and processed energy tables.
//!
//! Defaults live under the project root's `data/` directory. Each path can
//! be overridden with an environment variable.

use std::path::{Path, PathBuf};

/// Environment variable overriding the raw dataset location.
pub const RAW_CSV_ENV: &str = "ENERGY_RISK_RAW_CSV";

/// Environment variable overriding the processed table location.
pub const PROCESSED_CSV_ENV: &str = "ENERGY_RISK_PROCESSED_CSV";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`, falling back to the
/// manifest directory itself if it is not nested two levels deep.
#[must_use]
pub fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.ancestors().nth(2).unwrap_or(manifest).to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the `data/raw/` directory holding the downloaded OWID dataset.
#[must_use]
pub fn raw_dir() -> PathBuf {
    data_dir().join("raw")
}

/// Returns the `data/processed/` directory holding preparation output.
#[must_use]
pub fn processed_dir() -> PathBuf {
    data_dir().join("processed")
}

/// Path of the raw OWID energy CSV, honouring [`RAW_CSV_ENV`].
#[must_use]
pub fn raw_csv_path() -> PathBuf {
    env_path(RAW_CSV_ENV).unwrap_or_else(|| raw_dir().join("owid-energy-data.csv"))
}

/// Path of the processed CSV, honouring [`PROCESSED_CSV_ENV`].
#[must_use]
pub fn processed_csv_path() -> PathBuf {
    env_path(PROCESSED_CSV_ENV).unwrap_or_else(|| processed_dir().join("data_preparation.csv"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
