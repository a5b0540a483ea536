//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
///
/// All of these are raised while building a tagger, never per candidate.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A scalar setting is outside its allowed range.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// A numeric environment override could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    ParseFloat {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A boolean environment override could not be parsed.
    #[error("failed to parse {name} '{value}': expected true/false")]
    ParseBool { name: &'static str, value: String },

    /// The two pile-up MVA working-point lists must cover the same eta bins.
    #[error("pile-up working point lists differ in length: pt bin 1 has {bin1}, pt bin 2 has {bin2}")]
    MismatchedBinLengths { bin1: usize, bin2: usize },

    /// More working points than eta bins.
    #[error("pile-up working point list has {len} entries, at most {max} eta bins exist")]
    TooManyEtaBins { len: usize, max: usize },

    /// Category boundaries must come in `(hi, lo, hi, lo)` quadruples.
    #[error("category boundaries must be a multiple of 4 values, got {len}")]
    InvalidBoundaries { len: usize },

    /// Unknown jet quality tier name.
    #[error("unknown jet ID level '{value}': expected Loose, Tight, Tight2017 or Tight2018")]
    InvalidJetIdLevel { value: String },

    /// Shift/scale normalization vectors must match the input list.
    #[error("{name} has {actual} entries but the model has {expected} inputs")]
    NormalizationLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The adapter needs at least three named output classes.
    #[error("expected at least {expected} output classes, got {actual}")]
    TooFewOutputClasses { expected: usize, actual: usize },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON for the expected schema.
    #[error("failed to parse {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
