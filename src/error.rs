// src/error.rs

use std::{io, path::PathBuf};

use arrow::error::ArrowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SummaryError>;

/// Every failure the summary pipeline can hit. All of them are fatal.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("no input files matching `{pattern}` in {dir}")]
    NoInputFiles { dir: PathBuf, pattern: String },

    #[error("bad input pattern `{pattern}`")]
    Discovery {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("malformed file {file}: {reason}")]
    MalformedFile {
        file: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{file} is missing required column `{column}`")]
    MissingColumn { file: String, column: String },

    #[error("{file}, row {row}: `{value}` is not a number")]
    InvalidValue {
        file: String,
        row: usize,
        value: String,
    },

    #[error("failed writing output {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cannot resolve working directory")]
    WorkingDir(#[source] io::Error),

    #[error("table operation failed")]
    Arrow(#[from] ArrowError),
}

impl SummaryError {
    pub(crate) fn malformed(file: &str, reason: impl Into<String>) -> Self {
        SummaryError::MalformedFile {
            file: file.to_string(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn malformed_with<E>(file: &str, reason: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SummaryError::MalformedFile {
            file: file.to_string(),
            reason: reason.into(),
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn output<E>(path: impl Into<PathBuf>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SummaryError::OutputWrite {
            path: path.into(),
            source: Box::new(err),
        }
    }
}
