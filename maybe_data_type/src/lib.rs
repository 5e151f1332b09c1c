//! Representation of the dynamically typed values and types that access chains operate on.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use data_type::*;
pub use error::*;
pub use object::*;
pub use value::*;

mod data_type;
mod error;
mod object;
mod value;
