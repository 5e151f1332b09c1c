use std::{fmt, sync::Arc};

use maybe_data_type::{DataType, DataTypeRef, TypeName, Value};

/// A structured access-chain expression.
///
/// Expressions are built with the builder methods, e.g.
/// `Expr::root().field("Address").field("City")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The value an evaluator is invoked with.
    Root,
    /// A captured value.
    Constant {
        /// The value.
        value: Value,
        /// The static type of the value.
        data_type: DataTypeRef,
    },
    /// A field access on `object`.
    Field {
        /// The expression producing the owning object.
        object: Box<Expr>,
        /// The type the field is declared on, if stated.
        owner: Option<TypeName>,
        /// The field name.
        field: String,
    },
    /// A method call on `object`.
    Call {
        /// The expression producing the receiver.
        object: Box<Expr>,
        /// The type the method is declared on, if stated.
        owner: Option<TypeName>,
        /// The method name.
        method: String,
        /// The argument expressions, evaluated against the same root as the chain.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// The evaluator's root value.
    pub fn root() -> Self {
        Self::Root
    }

    /// A captured value, typed by inspecting it.
    ///
    /// `Value::None` has no type of its own, so chains rooted at it cannot resolve any links.
    /// Use [Expr::typed_constant] for roots that may be absent. An empty array is typed
    /// `array[any]`, which parameters like `array[int]` don't accept; type it explicitly too.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let data_type = Arc::new(DataType::of_value(&value));
        Self::Constant { value, data_type }
    }

    /// A captured value with an explicit static type.
    pub fn typed_constant(value: impl Into<Value>, data_type: DataTypeRef) -> Self {
        Self::Constant {
            value: value.into(),
            data_type,
        }
    }

    /// Access a field of this expression's value.
    pub fn field(self, field: &str) -> Self {
        Self::Field {
            object: Box::new(self),
            owner: None,
            field: field.to_string(),
        }
    }

    /// Access a field declared on `owner`.
    ///
    /// Compilation fails if this expression's static type is not `owner`.
    pub fn field_of(self, owner: impl Into<TypeName>, field: &str) -> Self {
        Self::Field {
            object: Box::new(self),
            owner: Some(owner.into()),
            field: field.to_string(),
        }
    }

    /// Call a method on this expression's value.
    pub fn call(self, method: &str, args: Vec<Expr>) -> Self {
        Self::Call {
            object: Box::new(self),
            owner: None,
            method: method.to_string(),
            args,
        }
    }

    /// Call a method declared on `owner`.
    pub fn call_of(self, owner: impl Into<TypeName>, method: &str, args: Vec<Expr>) -> Self {
        Self::Call {
            object: Box::new(self),
            owner: Some(owner.into()),
            method: method.to_string(),
            args,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut links = Vec::new();
        let mut root = self;
        while let Expr::Field { object, .. } | Expr::Call { object, .. } = root {
            links.push(root);
            root = &**object;
        }

        match root {
            Expr::Constant { value, .. } => write!(f, "{}", value)?,
            _ => write!(f, "root")?,
        }
        for link in links.into_iter().rev() {
            match link {
                Expr::Field { field, .. } => write!(f, ".{}", field)?,
                Expr::Call { method, args, .. } => write!(
                    f,
                    ".{}({})",
                    method,
                    args.iter()
                        .map(|arg| arg.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )?,
                Expr::Root | Expr::Constant { .. } => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_source() {
        let expr = Expr::root()
            .call("GetAccount", vec![Expr::constant(2), Expr::root().field("Id")])
            .field("Balance");
        assert_eq!(expr.to_string(), "root.GetAccount(2, root.Id).Balance");
        assert_eq!(Expr::constant("x").field("Len").to_string(), r#""x".Len"#);
    }

    #[test]
    fn constants_are_typed_from_their_value() {
        assert_eq!(
            Expr::constant(1.5),
            Expr::typed_constant(1.5, Arc::new(DataType::Float))
        );
        assert_eq!(
            Expr::constant(()),
            Expr::typed_constant(Value::None, Arc::new(DataType::Void))
        );
    }

    #[test]
    fn empty_array_constant_is_untyped() {
        assert_eq!(
            Expr::constant(Vec::<i32>::new()),
            Expr::typed_constant(Vec::<i32>::new(), DataType::array(Arc::new(DataType::Any)))
        );
    }
}
