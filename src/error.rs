use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by dataset synthesis, evaluation, and storage.
///
/// All errors propagate immediately to the caller; the crate performs no
/// local recovery or retries. Batch drivers decide whether to abort or skip.
#[derive(Debug)]
pub enum ShiftError {
    /// A selector or generator was constructed with impossible parameters.
    InvalidConfiguration(String),
    /// The candidate pool is too small for the requested partition sizes.
    InsufficientData { needed: usize, available: usize },
    /// A bias-weighting computation hit zero variance, making bias meaningless.
    DegenerateDistribution(String),
    /// Propagated from a model collaborator; fatal to the current batch item.
    ModelFit(String),
    /// A store directory already exists and `overwrite` was not set.
    StoreExists(PathBuf),
    /// A store directory does not exist on disk.
    StoreNotFound(PathBuf),
    /// A persisted data file failed validation on read.
    Corrupt(String),
    Io(std::io::Error),
}

impl fmt::Display for ShiftError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShiftError::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {}", msg)
            }
            ShiftError::InsufficientData { needed, available } => write!(
                f,
                "insufficient data: need at least {} rows, pool has {}",
                needed, available
            ),
            ShiftError::DegenerateDistribution(msg) => {
                write!(f, "degenerate distribution: {}", msg)
            }
            ShiftError::ModelFit(msg) => write!(f, "model fit failed: {}", msg),
            ShiftError::StoreExists(path) => {
                write!(f, "store already exists at '{}'", path.display())
            }
            ShiftError::StoreNotFound(path) => {
                write!(f, "store references non-existent path '{}'", path.display())
            }
            ShiftError::Corrupt(msg) => write!(f, "corrupt store data: {}", msg),
            ShiftError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl Error for ShiftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ShiftError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShiftError {
    fn from(err: std::io::Error) -> Self {
        ShiftError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, ShiftError>;
