//! Dynamically typed value produced by evaluating access chains.

use std::{fmt, sync::Arc};

use crate::{error::ValueTypeError, DataType, Object, ObjectRef};

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Represents the lack of a value.
    ///
    /// When any link of an access chain evaluates to `Value::None`, the rest of the chain is
    /// skipped and `Value::None` is returned for the entire chain.
    None,
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(IntValue),
    /// A float value.
    Float(FloatValue),
    /// A string value.
    String(String),
    /// A shared object value.
    Object(ObjectRef),
    /// An array value.
    Array(Vec<Value>),
}

/// An integer value.
pub type IntValue = i64;

/// A float value.
pub type FloatValue = f64;

impl Value {
    /// Return true if the value is `Value::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Return None if the value is none, and Some(self) otherwise.
    pub fn option(&self) -> Option<&Value> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }

    /// Return true if the value can be stored where `data_type` is expected.
    ///
    /// `Value::None` conforms to every type.
    pub fn conforms_to(&self, data_type: &DataType) -> bool {
        match (self, data_type) {
            (Value::None, _) | (_, DataType::Any) => true,
            (Value::Bool(_), DataType::Bool)
            | (Value::Int(_), DataType::Int)
            | (Value::Float(_), DataType::Float)
            | (Value::String(_), DataType::String) => true,
            (Value::Object(object), DataType::Object(name)) => object.type_name() == name,
            (Value::Array(elements), DataType::Array { base }) => {
                elements.iter().all(|element| element.conforms_to(base))
            }
            _ => false,
        }
    }

    /// Convert the value to an int, panicking if it is not an int.
    #[track_caller]
    pub fn as_int(&self) -> IntValue {
        match self.try_as_int() {
            Ok(n) => n,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to an int.
    pub fn try_as_int(&self) -> Result<IntValue, ValueTypeError> {
        if let Value::Int(n) = *self {
            Ok(n)
        } else {
            Err(ValueTypeError {
                expected: "int".into(),
                actual: self.clone(),
            })
        }
    }

    /// Convert the value to a float, panicking if the value is not a float.
    #[track_caller]
    pub fn as_float(&self) -> FloatValue {
        match self.try_as_float() {
            Ok(r) => r,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to a float.
    pub fn try_as_float(&self) -> Result<FloatValue, ValueTypeError> {
        if let Value::Float(r) = *self {
            Ok(r)
        } else {
            Err(ValueTypeError {
                expected: "float".into(),
                actual: self.clone(),
            })
        }
    }

    /// Convert the value to a string, panicking on failure.
    #[track_caller]
    pub fn as_str(&self) -> &str {
        match self.try_as_str() {
            Ok(s) => s,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to a string.
    pub fn try_as_str(&self) -> Result<&str, ValueTypeError> {
        if let Value::String(s) = self {
            Ok(s)
        } else {
            Err(ValueTypeError {
                expected: "string".into(),
                actual: self.clone(),
            })
        }
    }

    /// Convert the value to an object, panicking on failure.
    #[track_caller]
    pub fn as_object(&self) -> &ObjectRef {
        match self.try_as_object() {
            Ok(object) => object,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to an object.
    pub fn try_as_object(&self) -> Result<&ObjectRef, ValueTypeError> {
        if let Value::Object(object) = self {
            Ok(object)
        } else {
            Err(ValueTypeError {
                expected: "object".into(),
                actual: self.clone(),
            })
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(r) => write!(f, "{}", r),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(object) => write!(f, "{}", object),
            Value::Array(elements) => {
                write!(
                    f,
                    "[{}]",
                    elements
                        .iter()
                        .map(|element| format!("{}", element))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! value_from_int {
    ($ty:ty) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::Int(v.into())
            }
        }
    };
}

value_from_int!(i8);
value_from_int!(u8);
value_from_int!(i16);
value_from_int!(u16);
value_from_int!(i32);
value_from_int!(u32);
value_from_int!(i64);

macro_rules! value_from_float {
    ($ty:ty) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::Float(v.into())
            }
        }
    };
}

value_from_float!(f32);
value_from_float!(f64);

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(Arc::new(v))
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(|v| v.into()).collect())
    }
}
