use std::{fmt, sync::Arc};

use maybe_data_type::{DataType, DataTypeRef, Value};
use maybe_layout::DataLayout;

use crate::{compose, compose::Body, decompose, Chain, ChainError, EvalError, Expr, Link};

/// A compiled, null-safe access chain.
///
/// An evaluator holds no state between invocations, so it can be cached and shared between
/// threads.
#[derive(Clone)]
pub struct Evaluator {
    chain: Chain,
    body: Body,
}

impl Evaluator {
    pub(crate) fn new(chain: Chain, body: Body) -> Self {
        Self { chain, body }
    }

    /// Compile an expression into an evaluator for roots of type `input_type`.
    ///
    /// All shape errors are reported here; evaluation never raises them.
    pub fn compile(
        layout: &DataLayout,
        input_type: DataTypeRef,
        expr: &Expr,
    ) -> Result<Self, ChainError> {
        let chain = decompose(layout, &input_type, expr)?;
        tracing::debug!(
            source = chain.source.as_str(),
            links = chain.links.len(),
            "compiled chain"
        );
        Ok(compose(chain))
    }

    /// Get the source for the chain.
    pub fn source(&self) -> &str {
        &self.chain.source
    }

    /// The type of root value the evaluator expects.
    pub fn input_type(&self) -> &DataTypeRef {
        &self.chain.input_type
    }

    /// The static type of the value the chain produces.
    pub fn result_type(&self) -> &DataTypeRef {
        self.chain.result_type()
    }

    /// The resolved links, root to leaf.
    pub fn links(&self) -> &[Link] {
        &self.chain.links
    }

    /// The decomposed chain the evaluator was built from.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Evaluate the chain against `root`.
    ///
    /// Returns `Value::None` if any link is absent. For evaluators whose expression captures its
    /// own root, pass `Value::None`.
    pub fn eval(&self, root: &Value) -> Result<Value, EvalError> {
        self.eval_impl(root).map_err(|error| EvalError::Context {
            context: format!("while evaluating {}", self),
            error: Box::new(error),
        })
    }

    fn eval_impl(&self, root: &Value) -> Result<Value, EvalError> {
        let input_type = self.input_type();
        // A void input only admits none; other types admit none and conforming values.
        if !root.conforms_to(input_type) || (input_type.is_void() && !root.is_none()) {
            return Err(EvalError::RootTypeMismatch {
                expected: input_type.clone(),
                actual: root.clone(),
            });
        }
        self.eval_unchecked(root)
    }

    pub(crate) fn eval_unchecked(&self, input: &Value) -> Result<Value, EvalError> {
        (self.body)(input)
    }
}

/// Compile an expression for roots of type `input_type` without evaluating it.
pub fn compile(
    layout: &DataLayout,
    input_type: DataTypeRef,
    expr: &Expr,
) -> Result<Evaluator, ChainError> {
    Evaluator::compile(layout, input_type, expr)
}

/// Compile an expression whose root is captured in a constant and evaluate it immediately.
pub fn eval(layout: &DataLayout, expr: &Expr) -> Result<Value, EvalError> {
    Evaluator::compile(layout, Arc::new(DataType::Void), expr)?.eval(&Value::None)
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("source", &self.chain.source)
            .field("input_type", &self.chain.input_type)
            .field("links", &self.chain.links)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chain.source)
    }
}
