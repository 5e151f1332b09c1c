use std::sync::{Arc, Mutex};

use lru::LruCache;
use maybe_chain::{ChainError, Evaluator, Expr};
use maybe_data_type::DataTypeRef;
use maybe_layout::DataLayout;

use crate::EvaluatorCacheConfig;

/// Cache entries are keyed on the debug rendering of the expression, since the display form
/// can't tell apart constants like `2` and `2.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    input_type: DataTypeRef,
    expr: String,
}

/// A bounded cache of compiled evaluators.
#[derive(Debug)]
pub(crate) struct EvaluatorCache {
    evaluators: Mutex<LruCache<CacheKey, Arc<Evaluator>>>,
}

impl EvaluatorCache {
    pub(crate) fn new(config: &EvaluatorCacheConfig) -> Self {
        Self {
            evaluators: Mutex::new(LruCache::new(config.capacity)),
        }
    }

    pub(crate) fn get_or_compile(
        &self,
        layout: &DataLayout,
        input_type: &DataTypeRef,
        expr: &Expr,
    ) -> Result<Arc<Evaluator>, ChainError> {
        let key = CacheKey {
            input_type: input_type.clone(),
            expr: format!("{:?}", expr),
        };

        let mut cache = self.evaluators.lock().unwrap();
        if let Some(evaluator) = cache.get(&key) {
            return Ok(Arc::clone(evaluator));
        }

        tracing::debug!(source = %expr, input_type = %input_type, "evaluator cache miss");
        let evaluator = Arc::new(Evaluator::compile(layout, input_type.clone(), expr)?);
        if cache.cap() == 0 {
            return Ok(evaluator);
        }
        if cache.len() == cache.cap() {
            if let Some((_, evicted)) = cache.pop_lru() {
                tracing::debug!(source = evicted.source(), "evaluator cache evict");
            }
        }
        cache.put(key, Arc::clone(&evaluator));
        Ok(evaluator)
    }

    pub(crate) fn len(&self) -> usize {
        self.evaluators.lock().unwrap().len()
    }

    pub(crate) fn clear(&self) {
        self.evaluators.lock().unwrap().clear();
    }
}
