use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use safetensors::SafeTensorError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    Io(io::Error),
    Csv {
        line: usize,
        msg: String,
    },
    EmptyDataset,
    InvalidSplit {
        test_size: f64,
        len: usize,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    ClassCount {
        got: usize,
    },
    FeatureMismatch {
        got: usize,
        expected: usize,
    },
    InvalidConfig(String),
    Solver(String),
    Artifact(String),
    Safetensors(SafeTensorError),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::Io(e) => write!(f, "io error: {e}"),
            MlErr::Csv { line, msg } => write!(f, "malformed dataset at line {line}: {msg}"),
            MlErr::EmptyDataset => write!(f, "the dataset has no samples"),
            MlErr::InvalidSplit { test_size, len } => write!(
                f,
                "test_size={test_size} leaves an empty partition for a dataset of {len} samples"
            ),
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::ClassCount { got } => write!(
                f,
                "This solver needs samples of exactly 2 classes in the data, but the data contains {got}"
            ),
            MlErr::FeatureMismatch { got, expected } => write!(
                f,
                "X has {got} features, but LogisticRegression is expecting {expected} features as input."
            ),
            MlErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            MlErr::Solver(msg) => write!(f, "the solver failed: {msg}"),
            MlErr::Artifact(msg) => write!(f, "invalid model artifact: {msg}"),
            MlErr::Safetensors(e) => write!(f, "invalid model artifact: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Io(e) => Some(e),
            MlErr::Safetensors(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SafeTensorError> for MlErr {
    fn from(value: SafeTensorError) -> Self {
        match value {
            SafeTensorError::IoError(e) => Self::Io(e),
            other => Self::Safetensors(other),
        }
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<MlErr> for io::Error {
    fn from(value: MlErr) -> Self {
        match value {
            MlErr::Io(e) => e,
            MlErr::InvalidConfig(_) => io::Error::new(io::ErrorKind::InvalidInput, value),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
