use std::{fmt, sync::Arc};

use maybe_data_type::{DataTypeRef, ObjectRef, Value};

/// The native implementation of a method.
///
/// The first argument is the receiver. Returning `Value::None` makes any chain through the
/// call evaluate to none.
pub type MethodFn = Arc<dyn Fn(&ObjectRef, &[Value]) -> Value + Send + Sync>;

/// A method defined on an object type.
#[derive(Clone)]
pub struct Method {
    /// The declared parameter types.
    pub params: Vec<DataTypeRef>,
    /// The declared return type.
    pub return_type: DataTypeRef,
    /// The implementation.
    pub func: MethodFn,
}

impl Method {
    /// Wrap a native function as a method.
    pub fn new<F>(params: Vec<DataTypeRef>, return_type: DataTypeRef, func: F) -> Self
    where
        F: Fn(&ObjectRef, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            params,
            return_type,
            func: Arc::new(func),
        }
    }

    /// Call the method on `this`.
    ///
    /// Arguments are not checked against `params`; that happens when a chain is compiled.
    pub fn invoke(&self, this: &ObjectRef, args: &[Value]) -> Value {
        (self.func)(this, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}
