use std::path::PathBuf;
use thiserror::Error;

use crate::text;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("generate.hour_caps must not be empty")]
    NoHourCaps,

    #[error("Invalid hour cap {0}; caps must be positive")]
    InvalidHourCap(u32),

    #[error("generate.max_hours {0} is not one of generate.hour_caps")]
    MaxHoursNotOffered(u32),

    #[error("retry.max_attempts must be at least 1")]
    NoAttempts,

    #[error("server.base_url '{0}' must start with http:// or https://")]
    InvalidBaseUrl(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Plan request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Plan endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to read catalog file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected selection changes. The display text is the notice shown to the student.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{}", text::blocked_explanation(unmet))]
    Blocked { code: String, unmet: Vec<String> },

    #[error("Unknown course code: {0}")]
    UnknownCode(String),
}

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Recommendation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed recommendation response: {0}")]
    Malformed(String),

    #[error("Recommendation endpoint returned HTTP {status} with a success body")]
    UnexpectedStatus { status: u16 },
}

impl From<serde_json::Error> for RecommendError {
    fn from(e: serde_json::Error) -> Self {
        RecommendError::Malformed(e.to_string())
    }
}
