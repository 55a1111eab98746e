use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An input vector's length disagrees with a neuron's fan-in.
    ShapeMismatch { expected: usize, actual: usize },
    /// Numerically degenerate input (zero variance, non-finite values).
    DegenerateInput(String),
    InvalidConfig(String),
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected} inputs, got {actual}")
            }
            Error::DegenerateInput(msg) => write!(f, "degenerate input: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
