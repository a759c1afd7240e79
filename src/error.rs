use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid base URL '{url}': {source}")]
    BadUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {reason} (raw: {raw})")]
    InvalidResponse { reason: String, raw: String },

    #[error("Service at {0} did not answer")]
    Unreachable(String),

    #[error("Bad suite: {0}")]
    Suite(String),

    #[error("Suite file {path}: {source}")]
    SuiteFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
