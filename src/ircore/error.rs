use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("unsupported language: no tokenizer registered for {0:?}")]
    UnsupportedLanguage(String),

    #[error("vector dimension mismatch: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("document {id} is not valid UTF-8 text")]
    MalformedInput { id: String },
}

/// Errors raised by token cache backends. The indexer treats every one of
/// them as a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),

    #[error("cache entry could not be decoded: {0}")]
    Codec(#[from] bincode::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
