// ABOUTME: Application-wide error types for image-promote.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

use crate::promote::RunError;
use crate::types::{RepositoryError, TagError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid tag: {0}")]
    Tag(#[from] TagError),

    #[error("invalid repository: {0}")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
