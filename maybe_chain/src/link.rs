use std::fmt;

use maybe_data_type::{DataTypeRef, TypeName};
use maybe_layout::Method;

use crate::Expr;

/// One resolved step of a chain.
#[derive(Debug, Clone)]
pub enum Link {
    /// owner -> owner.field
    Field {
        /// The type the field is read from.
        owner: TypeName,
        /// The field name.
        field: String,
        /// The declared type of the field.
        data_type: DataTypeRef,
    },
    /// owner -> owner.name(args)
    Call {
        /// The type the method is called on.
        owner: TypeName,
        /// The method name.
        name: String,
        /// The argument chains, evaluated against the chain's root value.
        args: Vec<Chain>,
        /// The method to invoke.
        method: Method,
    },
}

impl Link {
    /// The type of the value this link is applied to.
    pub fn owner(&self) -> &TypeName {
        match self {
            Link::Field { owner, .. } | Link::Call { owner, .. } => owner,
        }
    }

    /// The field or method name.
    pub fn name(&self) -> &str {
        match self {
            Link::Field { field, .. } => field,
            Link::Call { name, .. } => name,
        }
    }

    /// The static type of the value the link produces.
    pub fn result_type(&self) -> &DataTypeRef {
        match self {
            Link::Field { data_type, .. } => data_type,
            Link::Call { method, .. } => &method.return_type,
        }
    }
}

/// A decomposed access chain: a root sub-expression followed by links, root to leaf.
#[derive(Debug, Clone)]
pub struct Chain {
    /// The source of the whole expression.
    pub source: String,
    /// The type of the value the chain is evaluated with.
    pub input_type: DataTypeRef,
    /// The innermost sub-expression, either [Expr::Root] or [Expr::Constant].
    pub root: Expr,
    /// The static type of `root`.
    pub root_type: DataTypeRef,
    /// The links to apply to the root's value, in evaluation order.
    pub links: Vec<Link>,
}

impl Chain {
    /// The static type of the value the whole chain produces.
    pub fn result_type(&self) -> &DataTypeRef {
        self.links
            .last()
            .map_or(&self.root_type, |link| link.result_type())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Field { owner, field, .. } => write!(f, "{}.{}", owner, field),
            Link::Call {
                owner, name, args, ..
            } => write!(
                f,
                "{}.{}({})",
                owner,
                name,
                args.iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
