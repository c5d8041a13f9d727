//! Error types for the cluster access layer

use thiserror::Error;

/// Errors surfaced by probing, dispatching and mapping
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server info request failed: {reason}")]
    ProbeFailed { reason: String },

    #[error("Elasticsearch version {0} is not supported by this tool")]
    UnsupportedClusterVersion(String),

    #[error("Operation '{operation}' has no implementation for version band {band}")]
    UnsupportedOperationForVersion { operation: String, band: String },

    #[error("Malformed response at '{path}': {reason}")]
    MalformedResponse { path: String, reason: String },

    #[error("Unparsable version string: '{0}'")]
    UnparsableVersion(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short machine-readable kind, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::ProbeFailed { .. } => "server_info_failed",
            Self::UnsupportedClusterVersion(_) => "unsupported_cluster_version",
            Self::UnsupportedOperationForVersion { .. } => "unsupported_operation_for_version",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::UnparsableVersion(_) => "unparsable_version",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Transport(format!("Invalid URL: {}", err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
