//! Types and functions for representing the static types of chain values.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::Value;

/// The static type of a value produced by an expression or link.
///
/// Every type is nullable: [Value::None] conforms to all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum DataType {
    /// No value at all, typically the input type of an expression with a captured root.
    Void,
    /// Any value. Links cannot be resolved against this type.
    Any,
    /// A boolean.
    Bool,
    /// An integer.
    Int,
    /// A float.
    Float,
    /// A string.
    String,
    /// A homogeneous array.
    Array {
        /// The element type.
        base: DataTypeRef,
    },
    /// An object whose fields and methods are defined in a layout.
    Object(TypeName),
}

/// A reference to a `DataType`.
pub type DataTypeRef = Arc<DataType>;

/// The name of an object type, e.g. `Person`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeName(pub String);

impl TypeName {
    /// Return the raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for TypeName {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl DataType {
    /// Shorthand for an object type reference.
    pub fn object(name: impl Into<TypeName>) -> DataTypeRef {
        Arc::new(Self::Object(name.into()))
    }

    /// Shorthand for an array type reference.
    pub fn array(base: DataTypeRef) -> DataTypeRef {
        Arc::new(Self::Array { base })
    }

    /// Infer the most specific type of a value.
    ///
    /// `Value::None` has no type of its own and is reported as void. The element type of an
    /// array is taken from its first present element.
    pub fn of_value(value: &Value) -> DataType {
        match value {
            Value::None => DataType::Void,
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::String(_) => DataType::String,
            Value::Object(object) => DataType::Object(object.type_name().clone()),
            Value::Array(elements) => DataType::Array {
                base: Arc::new(
                    elements
                        .iter()
                        .find(|element| !element.is_none())
                        .map(DataType::of_value)
                        .unwrap_or(DataType::Any),
                ),
            },
        }
    }

    /// Return true if the data type is void.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Return true if an expression of static type `other` can be used where `self` is
    /// expected.
    pub fn accepts(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::Any, _) => true,
            (DataType::Array { base }, DataType::Array { base: other_base }) => {
                base.accepts(other_base)
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Void => write!(f, "void"),
            DataType::Any => write!(f, "any"),
            DataType::Bool => write!(f, "bool"),
            DataType::Int => write!(f, "int"),
            DataType::Float => write!(f, "float"),
            DataType::String => write!(f, "string"),
            DataType::Array { base } => write!(f, "array[{}]", base),
            DataType::Object(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
