use serde::{Deserialize, Serialize};

use crate::Error;

/// Settings for the evaluator cache used by [Maybe](crate::Maybe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorCacheConfig {
    /// The maximum number of compiled evaluators kept. Zero disables caching.
    pub capacity: usize,
}

impl EvaluatorCacheConfig {
    /// Read a config from JSON. Missing keys take their default values.
    pub fn from_json(source: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Default for EvaluatorCacheConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        assert_eq!(
            EvaluatorCacheConfig::from_json("{}").unwrap(),
            EvaluatorCacheConfig::default()
        );
        assert_eq!(
            EvaluatorCacheConfig::from_json(r#"{ "capacity": 4 }"#)
                .unwrap()
                .capacity,
            4
        );
        assert!(matches!(
            EvaluatorCacheConfig::from_json(r#"{ "capacity": -1 }"#),
            Err(Error::ConfigError(_))
        ));
    }
}
