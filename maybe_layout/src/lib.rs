//! Definitions of the object types that access chains are resolved against.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub use data_layout::*;
pub use error::*;
pub use method::*;

mod data_layout;
mod error;
mod json;
mod method;
