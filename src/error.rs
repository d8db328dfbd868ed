//! Error types for the loading, ensemble and submission stages

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading and parsing the sensor data files.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{path}: line {line} has {found} values, expected {expected}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}: expected {expected} rows, found {found}")]
    RowCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("{path}: expected {expected} labels, found {found}")]
    LabelCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while fitting or applying the per-channel ensemble.
#[derive(Error, Debug)]
pub enum EnsembleError {
    #[error("invalid neighbor count k={k} for {n_samples} training samples")]
    InvalidK { k: usize, n_samples: usize },

    #[error("channel {channel}: training matrix has {rows} rows but the label vector has {labels}")]
    ShapeMismatch {
        channel: usize,
        rows: usize,
        labels: usize,
    },

    #[error("expected {expected} channel matrices, found {found}")]
    ChannelCount { expected: usize, found: usize },

    #[error("channel {channel}: test matrix has {rows} rows, expected {expected}")]
    TestShape {
        channel: usize,
        rows: usize,
        expected: usize,
    },

    #[error("ensemble has no fitted channel models")]
    NoModels,
}

/// Domain validation errors raised by the submission writer before any
/// output is produced.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("expected {expected} predictions, found {found}")]
    Length { expected: usize, found: usize },

    #[error("class {0} does not exist (minimum is {min})", min = crate::submission::MIN_CLASS)]
    ClassTooSmall(i64),

    #[error("class {0} does not exist (maximum is {max})", max = crate::submission::MAX_CLASS)]
    ClassTooLarge(i64),

    #[error(transparent)]
    Io(#[from] io::Error),
}
