//! Error types shared across the library.
//!
//! Each module owns one small enum; the binary collapses them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// URL input rejected before a scan is requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("'{input}' is not a valid URL: {reason}")]
    Malformed { input: String, reason: String },

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("URL '{0}' has no host")]
    MissingHost(String),
}

/// Compliance score cannot be computed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    #[error("no passed or failed checks to score")]
    DivisionByZero,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("cannot aggregate an empty page list")]
    NoPages,

    #[error("page '{url}' counters disagree with its issues: {detail}")]
    InconsistentPage { url: String, detail: String },

    #[error("{counter} total overflows when adding page '{url}'")]
    CounterOverflow { url: String, counter: String },
}

/// Event not allowed in the current UI state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a scan is already running")]
    ScanInProgress,

    #[error("no scan is running")]
    NotScanning,

    #[error(transparent)]
    InvalidUrl(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    InvalidUrl(#[from] ValidationError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("no accessibility standard selected")]
    NoStandards,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Page list given to `allyscan aggregate` cannot be used.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read pages file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pages file is not a valid JSON page list: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}
