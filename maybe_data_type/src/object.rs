//! Objects, the values that field-access and call links operate on.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{TypeName, Value};

/// An instance of an object type.
///
/// Objects are immutable once built and shared through [ObjectRef], so cloning a [Value]
/// holding an object is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    type_name: TypeName,
    fields: IndexMap<String, Value>,
}

/// A shared reference to an `Object`.
pub type ObjectRef = Arc<Object>;

impl Object {
    /// Build an object from its type name and field values.
    ///
    /// No validation happens here. Use `DataLayout::new_object` in `maybe_layout` to check
    /// the fields against a type definition.
    pub fn new(type_name: TypeName, fields: IndexMap<String, Value>) -> Self {
        Self { type_name, fields }
    }

    /// The name of the object's type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// The stored field values, in definition order.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Look up a field value.
    ///
    /// A field that was never stored reads as `Value::None`.
    pub fn field(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or(Value::None)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{ {} }}",
            self.type_name,
            self.fields
                .iter()
                .map(|(name, value)| format!("{} = {}", name, value))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
