//! Reading values from JSON, guided by the declared types in a layout.

use indexmap::IndexMap;
use maybe_data_type::{DataType, DataTypeRef, Object, TypeName, Value};
use serde_json::Value as Json;

use crate::{DataLayout, LayoutError};

impl DataLayout {
    /// Read an object of type `type_name` from a JSON object.
    ///
    /// `null` and absent keys become `Value::None`. Keys that are not declared fields are an
    /// error.
    pub fn object_from_json(&self, type_name: &TypeName, json: &Json) -> Result<Value, LayoutError> {
        self.value_from_json(&DataType::object(type_name.clone()), json)
    }

    /// Read a value of the given type from JSON.
    pub fn value_from_json(&self, data_type: &DataTypeRef, json: &Json) -> Result<Value, LayoutError> {
        let unexpected = || LayoutError::UnexpectedJson {
            expected: data_type.clone(),
            json: json.to_string(),
        };
        let value = match (data_type.as_ref(), json) {
            (_, Json::Null) => Value::None,
            (DataType::Bool, Json::Bool(b)) => Value::Bool(*b),
            (DataType::Int, Json::Number(n)) => Value::Int(n.as_i64().ok_or_else(unexpected)?),
            (DataType::Float, Json::Number(n)) => Value::Float(n.as_f64().ok_or_else(unexpected)?),
            (DataType::String, Json::String(s)) => Value::String(s.clone()),
            (DataType::Array { base }, Json::Array(elements)) => Value::Array(
                elements
                    .iter()
                    .map(|element| self.value_from_json(base, element))
                    .collect::<Result<_, _>>()?,
            ),
            (DataType::Object(name), Json::Object(entries)) => {
                let defn = self.type_defn(name)?;
                let mut fields = IndexMap::new();
                for (field_name, field_json) in entries {
                    let field_type = self.field_type(name, field_name)?;
                    let field_value = self.value_from_json(field_type, field_json)?;
                    if !field_value.is_none() {
                        fields.insert(field_name.clone(), field_value);
                    }
                }
                // Keep definition order regardless of the JSON key order.
                fields.sort_by(|a, _, b, _| {
                    defn.fields
                        .get_index_of(a)
                        .cmp(&defn.fields.get_index_of(b))
                });
                Object::new(name.clone(), fields).into()
            }
            (DataType::Any, json) => self.untyped_value_from_json(json).ok_or_else(unexpected)?,
            _ => return Err(unexpected()),
        };
        Ok(value)
    }

    fn untyped_value_from_json(&self, json: &Json) -> Option<Value> {
        Some(match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(n) => Value::Int(n),
                None => Value::Float(n.as_f64()?),
            },
            Json::String(s) => Value::String(s.clone()),
            Json::Array(elements) => Value::Array(
                elements
                    .iter()
                    .map(|element| self.untyped_value_from_json(element))
                    .collect::<Option<_>>()?,
            ),
            // The type of an object cannot be inferred from its keys.
            Json::Object(_) => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::LayoutLookupError;

    fn layout() -> DataLayout {
        let mut layout = DataLayout::new();
        layout.define_type(
            "Address",
            [
                ("City", Arc::new(DataType::String)),
                ("Zip", Arc::new(DataType::Int)),
            ],
        );
        layout.define_type(
            "Person",
            [
                ("Address", DataType::object("Address")),
                ("Tags", DataType::array(Arc::new(DataType::Any))),
            ],
        );
        layout
    }

    #[test]
    fn reads_nested_objects() {
        let layout = layout();
        let person = layout
            .object_from_json(
                &"Person".into(),
                &json!({ "Tags": [1, "a", null], "Address": { "Zip": 69001, "City": "Lyon" } }),
            )
            .unwrap();
        let person = person.as_object();
        assert_eq!(
            person.fields().keys().collect::<Vec<_>>(),
            vec!["Address", "Tags"]
        );
        let address = person.field("Address");
        assert_eq!(address.as_object().field("City"), Value::from("Lyon"));
        assert_eq!(address.as_object().field("Zip"), Value::Int(69001));
        assert_eq!(
            person.field("Tags"),
            Value::Array(vec![Value::Int(1), Value::from("a"), Value::None])
        );
        assert!(person.field("Tags").conforms_to(&DataType::array(Arc::new(DataType::Any))));
    }

    #[test]
    fn null_fields_are_left_unset() {
        let layout = layout();
        let person = layout
            .object_from_json(&"Person".into(), &json!({ "Address": null }))
            .unwrap();
        assert!(person.as_object().fields().is_empty());
        assert_eq!(person.as_object().field("Address"), Value::None);
    }

    #[test]
    fn rejects_mismatched_json() {
        let layout = layout();
        assert!(matches!(
            layout.object_from_json(&"Address".into(), &json!({ "City": 3 })),
            Err(LayoutError::UnexpectedJson { .. })
        ));
        assert!(matches!(
            layout.object_from_json(&"Address".into(), &json!({ "Street": "x" })),
            Err(LayoutError::LayoutLookupError(
                LayoutLookupError::UndefinedField { .. }
            ))
        ));
        assert!(matches!(
            layout.object_from_json(&"Country".into(), &json!({})),
            Err(LayoutError::LayoutLookupError(
                LayoutLookupError::UndefinedTypeName(_)
            ))
        ));
    }
}
