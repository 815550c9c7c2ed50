use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Block too short: expected at least {expected} bytes, got {actual}")]
    ShortBlock { expected: usize, actual: usize },

    #[error("Not a macro data file name: {0}")]
    InvalidFileName(String),

    #[error("Lookup table {path:?} is not a mapping")]
    LookupParse { path: PathBuf },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
