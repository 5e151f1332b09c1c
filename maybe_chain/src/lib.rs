//! Null-safe evaluation of field-access and method-call chains.
//!
//! An access chain such as `p.Address.City` or `p.GetAccount().Balance` is written once as an
//! [Expr]. Compiling it produces an [Evaluator] that checks every intermediate value and
//! returns `Value::None` as soon as one is absent, instead of failing.
//!
//! Compilation happens in two steps:
//! - [decompose] walks the expression from its outermost link back to its root and resolves
//!   each link's owner type against a [DataLayout](maybe_layout::DataLayout), producing a
//!   [Chain].
//! - [compose] folds the chain's links into nested null checks and returns the evaluator.
//!
//! Malformed chains are rejected at compile time with
//! [ChainError::UnsupportedChainShape]. Absent values are never errors.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use maybe_chain::{compile, Expr};
//! use maybe_data_type::{DataType, Value};
//! use maybe_layout::DataLayout;
//!
//! let mut layout = DataLayout::new();
//! layout.define_type("Address", [("City", Arc::new(DataType::String))]);
//! layout.define_type("Person", [("Address", DataType::object("Address"))]);
//!
//! let city = Expr::root().field("Address").field("City");
//! let evaluator = compile(&layout, DataType::object("Person"), &city).unwrap();
//!
//! let address = layout.new_object("Address", [("City", "Lyon")]).unwrap();
//! let lyon = layout.new_object("Person", [("Address", address)]).unwrap();
//! let nowhere = layout.new_object("Person", [("Address", Value::None)]).unwrap();
//!
//! assert_eq!(evaluator.eval(&lyon).unwrap(), Value::from("Lyon"));
//! assert_eq!(evaluator.eval(&nowhere).unwrap(), Value::None);
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub use compose::*;
pub use decompose::*;
pub use error::*;
pub use evaluator::*;
pub use expr::*;
pub use link::*;

mod compose;
mod decompose;
mod error;
mod evaluator;
mod expr;
mod link;
