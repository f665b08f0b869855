use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading profile data. These are the only fatal
/// conditions in a batch run; everything inside the core degrades to
/// per-profile absence instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("no profile data found under {0}")]
    NoProfiles(PathBuf),
}

/// Errors raised while writing result tables.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write table '{name}': {source}")]
    Write { name: String, source: csv::Error },
}
