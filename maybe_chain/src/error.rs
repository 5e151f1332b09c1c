#![allow(missing_docs)]

use std::{error::Error, fmt};

use maybe_data_type::{DataTypeRef, TypeName, Value, ValueTypeError};
use maybe_layout::LayoutLookupError;

/// An error raised while building an evaluator from an expression.
#[derive(Debug, Clone)]
pub enum ChainError {
    UnsupportedChainShape { source: String, error: ShapeError },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::UnsupportedChainShape { source, error } => {
                write!(f, "unsupported chain '{}':\n  {}", source, error)
            }
        }
    }
}

impl Error for ChainError {}

#[derive(Debug, Clone)]
pub enum ShapeError {
    LayoutLookupError(LayoutLookupError),
    UnboundRoot,
    NotAnObject {
        link: String,
        data_type: DataTypeRef,
    },
    OwnerMismatch {
        link: String,
        expected: TypeName,
        actual: TypeName,
    },
    ArgumentCount {
        method: String,
        expected: usize,
        actual: usize,
    },
    ArgumentType {
        method: String,
        index: usize,
        expected: DataTypeRef,
        actual: DataTypeRef,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::LayoutLookupError(error) => write!(f, "{}", error),
            ShapeError::UnboundRoot => write!(f, "root is not bound to a value"),
            ShapeError::NotAnObject { link, data_type } => {
                write!(f, "accessing {} in non-object type {}", link, data_type)
            }
            ShapeError::OwnerMismatch {
                link,
                expected,
                actual,
            } => write!(
                f,
                "{} is declared on {}, but is applied to {}",
                link, expected, actual
            ),
            ShapeError::ArgumentCount {
                method,
                expected,
                actual,
            } => write!(
                f,
                "{} takes {} arguments, found {}",
                method, expected, actual
            ),
            ShapeError::ArgumentType {
                method,
                index,
                expected,
                actual,
            } => write!(
                f,
                "argument {} of {}: expected {}, found {}",
                index, method, expected, actual
            ),
        }
    }
}

impl Error for ShapeError {}

impl From<LayoutLookupError> for ShapeError {
    fn from(v: LayoutLookupError) -> Self {
        Self::LayoutLookupError(v)
    }
}

/// An error raised while evaluating a chain.
///
/// An absent link is not an error; it evaluates to `Value::None`.
#[derive(Debug, Clone)]
pub enum EvalError {
    Context {
        context: String,
        error: Box<EvalError>,
    },
    ChainError(ChainError),
    ValueTypeError(ValueTypeError),
    RootTypeMismatch {
        expected: DataTypeRef,
        actual: Value,
    },
    OwnerTypeMismatch {
        link: String,
        expected: TypeName,
        actual: TypeName,
    },
    ResultTypeMismatch {
        link: String,
        expected: DataTypeRef,
        actual: Value,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Context { context, error } => write!(f, "{}:\n  {}", context, error),
            EvalError::ChainError(error) => write!(f, "{}", error),
            EvalError::ValueTypeError(error) => write!(f, "{}", error),
            EvalError::RootTypeMismatch { expected, actual } => {
                write!(f, "root of type {} cannot be {}", expected, actual)
            }
            EvalError::OwnerTypeMismatch {
                link,
                expected,
                actual,
            } => write!(
                f,
                "{} expects an object of type {}, found {}",
                link, expected, actual
            ),
            EvalError::ResultTypeMismatch {
                link,
                expected,
                actual,
            } => write!(
                f,
                "{} produced {}, expected a value of type {}",
                link, actual, expected
            ),
        }
    }
}

impl Error for EvalError {}

impl From<ChainError> for EvalError {
    fn from(v: ChainError) -> Self {
        Self::ChainError(v)
    }
}

impl From<ValueTypeError> for EvalError {
    fn from(v: ValueTypeError) -> Self {
        Self::ValueTypeError(v)
    }
}
