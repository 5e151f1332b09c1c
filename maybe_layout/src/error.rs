#![allow(missing_docs)]

use std::{error::Error, fmt, sync::Arc};

use maybe_data_type::{DataTypeRef, TypeName, Value};

#[derive(Debug, Clone)]
pub enum LayoutLookupError {
    UndefinedTypeName(TypeName),
    UndefinedField { owner: TypeName, name: String },
    UndefinedMethod { owner: TypeName, name: String },
}

impl fmt::Display for LayoutLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutLookupError::UndefinedTypeName(type_name) => {
                write!(f, "undefined type name: {}", type_name)
            }
            LayoutLookupError::UndefinedField { owner, name } => {
                write!(f, "undefined field {} in type {}", name, owner)
            }
            LayoutLookupError::UndefinedMethod { owner, name } => {
                write!(f, "undefined method {} in type {}", name, owner)
            }
        }
    }
}

impl Error for LayoutLookupError {}

#[derive(Debug, Clone)]
pub enum LayoutError {
    LayoutLookupError(LayoutLookupError),
    InvalidFieldValue {
        owner: TypeName,
        field: String,
        expected: DataTypeRef,
        value: Value,
    },
    UnexpectedJson {
        expected: DataTypeRef,
        json: String,
    },
    JsonError(Arc<serde_json::Error>),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::LayoutLookupError(error) => write!(f, "{}", error),
            LayoutError::InvalidFieldValue {
                owner,
                field,
                expected,
                value,
            } => write!(
                f,
                "invalid value for {}.{}: expected {}, found {}",
                owner, field, expected, value
            ),
            LayoutError::UnexpectedJson { expected, json } => {
                write!(f, "expected json for {}, found {}", expected, json)
            }
            LayoutError::JsonError(error) => write!(f, "json error: {}", error),
        }
    }
}

impl Error for LayoutError {}

impl From<LayoutLookupError> for LayoutError {
    fn from(v: LayoutLookupError) -> Self {
        Self::LayoutLookupError(v)
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(v: serde_json::Error) -> Self {
        Self::JsonError(Arc::new(v))
    }
}
