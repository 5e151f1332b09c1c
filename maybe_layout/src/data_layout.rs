//! Recording and looking up object type definitions.

use std::{collections::HashMap, fmt, sync::Arc};

use indexmap::IndexMap;
use maybe_data_type::{DataTypeRef, Object, ObjectRef, TypeName, Value};
use serde::{Deserialize, Serialize};

use crate::{
    LayoutError,
    LayoutLookupError::{self, *},
    Method,
};

/// A shared reference to a data layout.
pub type DataLayoutRef = Arc<DataLayout>;

/// A description of the object types that chains can walk through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataLayout {
    /// The definitions of object types.
    pub type_defns: HashMap<TypeName, TypeDefn>,
}

/// The fields and methods of an object type.
///
/// Only fields are serialized. Methods are native code and must be bound with
/// [DataLayout::define_method] after loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDefn {
    /// The declared fields, in definition order.
    pub fields: IndexMap<String, DataTypeRef>,
    /// The methods that can be called on instances of the type.
    #[serde(skip)]
    pub methods: IndexMap<String, Method>,
}

impl DataLayout {
    /// Create an empty data layout.
    pub fn new() -> Self {
        Self {
            type_defns: HashMap::new(),
        }
    }

    /// Load type definitions from JSON.
    pub fn from_json(source: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize the type definitions to JSON.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Define an object type, replacing any previous definition with the same name.
    pub fn define_type<S>(
        &mut self,
        name: impl Into<TypeName>,
        fields: impl IntoIterator<Item = (S, DataTypeRef)>,
    ) where
        S: Into<String>,
    {
        let defn = TypeDefn {
            fields: fields
                .into_iter()
                .map(|(name, data_type)| (name.into(), data_type))
                .collect(),
            methods: IndexMap::new(),
        };
        self.type_defns.insert(name.into(), defn);
    }

    /// Bind a method to a previously defined type.
    pub fn define_method<F>(
        &mut self,
        owner: &TypeName,
        name: &str,
        params: Vec<DataTypeRef>,
        return_type: DataTypeRef,
        func: F,
    ) -> Result<(), LayoutLookupError>
    where
        F: Fn(&ObjectRef, &[Value]) -> Value + Send + Sync + 'static,
    {
        let defn = self
            .type_defns
            .get_mut(owner)
            .ok_or_else(|| UndefinedTypeName(owner.clone()))?;
        defn.methods
            .insert(name.to_string(), Method::new(params, return_type, func));
        Ok(())
    }

    /// Look up the definition of a type name.
    pub fn type_defn(&self, name: &TypeName) -> Result<&TypeDefn, LayoutLookupError> {
        self.type_defns
            .get(name)
            .ok_or_else(|| UndefinedTypeName(name.clone()))
    }

    /// Look up the declared type of a field.
    pub fn field_type(&self, owner: &TypeName, name: &str) -> Result<&DataTypeRef, LayoutLookupError> {
        self.type_defn(owner)?
            .fields
            .get(name)
            .ok_or_else(|| UndefinedField {
                owner: owner.clone(),
                name: name.to_string(),
            })
    }

    /// Look up a method.
    pub fn method(&self, owner: &TypeName, name: &str) -> Result<&Method, LayoutLookupError> {
        self.type_defn(owner)?
            .methods
            .get(name)
            .ok_or_else(|| UndefinedMethod {
                owner: owner.clone(),
                name: name.to_string(),
            })
    }

    /// Build an object value, checking each field against the type definition.
    ///
    /// Fields that are not given are left unset and read as `Value::None`.
    pub fn new_object<K, V>(
        &self,
        type_name: impl Into<TypeName>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Value, LayoutError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let type_name = type_name.into();
        let mut values = IndexMap::new();
        for (name, value) in fields {
            let name = name.into();
            let value = value.into();
            let expected = self.field_type(&type_name, &name)?;
            if !value.conforms_to(expected) {
                return Err(LayoutError::InvalidFieldValue {
                    owner: type_name,
                    field: name,
                    expected: expected.clone(),
                    value,
                });
            }
            values.insert(name, value);
        }
        Ok(Object::new(type_name, values).into())
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&TypeName> = self.type_defns.keys().collect();
        names.sort();
        for name in names {
            writeln!(f, "{} = {}", name, self.type_defns[name])?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDefn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (name, data_type) in &self.fields {
            writeln!(f, "  {}: {}", name, data_type)?;
        }
        for (name, method) in &self.methods {
            writeln!(
                f,
                "  {}({}) -> {}",
                name,
                method
                    .params
                    .iter()
                    .map(|param| param.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                method.return_type
            )?;
        }
        write!(f, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use maybe_data_type::DataType;

    use super::*;

    fn layout() -> DataLayout {
        let mut layout = DataLayout::new();
        layout.define_type("Address", [("City", Arc::new(DataType::String))]);
        layout.define_type(
            "Person",
            [
                ("Name", Arc::new(DataType::String)),
                ("Address", DataType::object("Address")),
            ],
        );
        layout
            .define_method(
                &"Person".into(),
                "Greeting",
                vec![],
                Arc::new(DataType::String),
                |this, _| format!("hello {}", this.field("Name")).into(),
            )
            .unwrap();
        layout
    }

    #[test]
    fn new_object_validates_fields() {
        let layout = layout();
        let person = layout.new_object("Person", [("Name", "Ada")]).unwrap();
        assert_eq!(person.as_object().field("Address"), Value::None);

        let error = layout.new_object("Person", [("Name", 3)]).unwrap_err();
        assert!(matches!(error, LayoutError::InvalidFieldValue { .. }));

        let error = layout.new_object("Person", [("Age", 3)]).unwrap_err();
        assert!(matches!(
            error,
            LayoutError::LayoutLookupError(UndefinedField { .. })
        ));
    }

    #[test]
    fn method_lookup() {
        let mut layout = layout();
        let person = layout.new_object("Person", [("Name", "Ada")]).unwrap();
        let greeting = layout.method(&"Person".into(), "Greeting").unwrap();
        assert_eq!(
            greeting.invoke(person.as_object(), &[]),
            Value::from("hello \"Ada\"")
        );
        assert!(matches!(
            layout.method(&"Address".into(), "Greeting"),
            Err(UndefinedMethod { .. })
        ));
        assert!(matches!(
            layout.define_method(&"Nope".into(), "x", vec![], Arc::new(DataType::Void), |_, _| {
                Value::None
            }),
            Err(UndefinedTypeName(_))
        ));
    }

    #[test]
    fn json_keeps_fields_and_drops_methods() {
        let layout = layout();
        let loaded = DataLayout::from_json(&layout.to_json().unwrap()).unwrap();
        let person = loaded.type_defn(&"Person".into()).unwrap();
        assert_eq!(
            person.fields.keys().collect::<Vec<_>>(),
            vec!["Name", "Address"]
        );
        assert!(person.methods.is_empty());
        assert_eq!(
            loaded.field_type(&"Person".into(), "Address").unwrap().as_ref(),
            &DataType::Object("Address".into())
        );
    }
}
