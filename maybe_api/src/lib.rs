//! The main API for null-safe access chains.
//!
//! [Maybe] holds a [DataLayout](maybe_layout::DataLayout) and a cache of compiled
//! evaluators. Expressions are built with [Expr]:
//!
//! - `Expr::root().field("Address").field("City")` reads `root.Address.City`.
//! - `Expr::root().call("GetAccount", vec![]).field("Balance")` calls a method bound on the
//!   layout and reads a field of the result.
//! - `Expr::constant(value)` captures a root value, so the expression can be evaluated on its
//!   own with [Maybe::eval].
//!
//! If any value along the chain is `Value::None`, the rest of the chain is skipped and the
//! result is `Value::None`. Errors are reserved for chains that don't fit the layout, which
//! are reported when the expression is compiled.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use maybe_api::{DataLayout, DataType, Expr, Maybe, Value};
//!
//! let mut layout = DataLayout::new();
//! layout.define_type("Account", [("Balance", Arc::new(DataType::Float))]);
//! layout.define_type("Person", [("Account", DataType::object("Account"))]);
//! layout
//!     .define_method(
//!         &"Person".into(),
//!         "GetAccount",
//!         vec![],
//!         DataType::object("Account"),
//!         |this, _| this.field("Account"),
//!     )
//!     .unwrap();
//! let maybe = Maybe::new(layout);
//!
//! let person = maybe.layout().new_object("Person", [("Account", Value::None)]).unwrap();
//! let balance = Expr::constant(person).call("GetAccount", vec![]).field("Balance");
//! assert_eq!(maybe.eval(&balance), Value::None);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use config::*;
pub use error::*;
pub use maybe::*;
pub use maybe_chain::{ChainError, EvalError, Evaluator, Expr, ShapeError};
pub use maybe_data_type::{DataType, DataTypeRef, Object, ObjectRef, TypeName, Value};
pub use maybe_layout::{DataLayout, DataLayoutRef, LayoutError, LayoutLookupError};

mod config;
mod error;
mod evaluator_cache;
mod maybe;
