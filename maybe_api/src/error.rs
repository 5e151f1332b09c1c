#![allow(missing_docs)]

use std::{error, fmt};

use maybe_chain::{ChainError, EvalError};

#[derive(Debug, Clone)]
pub enum Error {
    ChainError(ChainError),
    EvalError(EvalError),
    ConfigError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ChainError(error) => write!(f, "{}", error),
            Error::EvalError(error) => write!(f, "{}", error),
            Error::ConfigError(message) => write!(f, "invalid config: {}", message),
        }
    }
}

impl error::Error for Error {}

impl From<ChainError> for Error {
    fn from(v: ChainError) -> Self {
        Self::ChainError(v)
    }
}

impl From<EvalError> for Error {
    fn from(v: EvalError) -> Self {
        Self::EvalError(v)
    }
}

impl From<serde_json::Error> for Error {
    fn from(v: serde_json::Error) -> Self {
        Self::ConfigError(v.to_string())
    }
}
