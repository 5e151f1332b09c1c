use std::sync::Arc;

use maybe_chain::{Evaluator, Expr};
use maybe_data_type::{DataType, DataTypeRef, Value};
use maybe_layout::DataLayoutRef;

use crate::{evaluator_cache::EvaluatorCache, Error, EvaluatorCacheConfig};

/// A layout together with a cache of the evaluators compiled against it.
///
/// `Maybe` is `Send + Sync`; compiled evaluators are shared between callers.
#[derive(Debug)]
pub struct Maybe {
    layout: DataLayoutRef,
    cache: EvaluatorCache,
}

impl Maybe {
    /// Create a `Maybe` with the default cache configuration.
    pub fn new(layout: impl Into<DataLayoutRef>) -> Self {
        Self::with_config(layout, &EvaluatorCacheConfig::default())
    }

    /// Create a `Maybe` with the given cache configuration.
    pub fn with_config(layout: impl Into<DataLayoutRef>, config: &EvaluatorCacheConfig) -> Self {
        Self {
            layout: layout.into(),
            cache: EvaluatorCache::new(config),
        }
    }

    /// The layout that expressions are resolved against.
    pub fn layout(&self) -> &DataLayoutRef {
        &self.layout
    }

    /// Compile an expression for roots of type `input_type`, reusing a cached evaluator if the
    /// same expression was compiled before.
    ///
    /// # Panics
    ///
    /// Panics if the expression is not a valid chain for `input_type`.
    #[track_caller]
    pub fn compile(&self, input_type: &DataTypeRef, expr: &Expr) -> Arc<Evaluator> {
        match self.try_compile(input_type, expr) {
            Ok(evaluator) => evaluator,
            Err(error) => panic!("Error:\n  failed to compile '{}':\n  {}\n", expr, error),
        }
    }

    /// Compile an expression for roots of type `input_type`, reusing a cached evaluator if the
    /// same expression was compiled before.
    ///
    /// Returns an error if the expression is not a valid chain for `input_type`.
    pub fn try_compile(
        &self,
        input_type: &DataTypeRef,
        expr: &Expr,
    ) -> Result<Arc<Evaluator>, Error> {
        let evaluator = self.cache.get_or_compile(&self.layout, input_type, expr)?;
        Ok(evaluator)
    }

    /// Evaluate an expression that captures its own root.
    ///
    /// Returns `Value::None` if any link in the chain is absent.
    ///
    /// # Panics
    ///
    /// Panics if the expression fails to compile or evaluation hits a type error.
    #[track_caller]
    pub fn eval(&self, expr: &Expr) -> Value {
        match self.try_eval(expr) {
            Ok(value) => value,
            Err(error) => panic!("Error:\n  failed to evaluate '{}':\n  {}\n", expr, error),
        }
    }

    /// Evaluate an expression that captures its own root.
    ///
    /// The evaluator is built for this call only and is not cached, since it holds the
    /// captured root.
    ///
    /// Returns `Value::None` if any link in the chain is absent, and an error if the
    /// expression fails to compile or evaluation hits a type error.
    pub fn try_eval(&self, expr: &Expr) -> Result<Value, Error> {
        let evaluator = Evaluator::compile(&self.layout, Arc::new(DataType::Void), expr)?;
        let value = evaluator.eval(&Value::None)?;
        Ok(value)
    }

    /// Evaluate an expression against `root`.
    ///
    /// # Panics
    ///
    /// Panics if the expression fails to compile or evaluation hits a type error.
    #[track_caller]
    pub fn eval_with(&self, input_type: &DataTypeRef, expr: &Expr, root: &Value) -> Value {
        match self.try_eval_with(input_type, expr, root) {
            Ok(value) => value,
            Err(error) => panic!("Error:\n  failed to evaluate '{}':\n  {}\n", expr, error),
        }
    }

    /// Evaluate an expression against `root`.
    ///
    /// Returns an error if the expression fails to compile or evaluation hits a type error.
    pub fn try_eval_with(
        &self,
        input_type: &DataTypeRef,
        expr: &Expr,
        root: &Value,
    ) -> Result<Value, Error> {
        let evaluator = self.try_compile(input_type, expr)?;
        let value = evaluator.eval(root)?;
        Ok(value)
    }

    /// The number of evaluators currently cached.
    pub fn cached_evaluators(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached evaluators.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
