// Parser configuration.

use serde::{Deserialize, Serialize};

/// Default limit on expression and subquery nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunables for a [`crate::Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting of expressions and queries before parsing fails
    /// with `RecursionLimit`. Every link of an open operator or set
    /// operation chain counts as one level too, since it nests the tree.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(ParserConfig::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ParserConfig::default().with_max_depth(4).max_depth, 4);
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let cfg: ParserConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(cfg, ParserConfig::default());
        let cfg: ParserConfig = serde_json::from_str(r#"{"max_depth": 16}"#).expect("valid json");
        assert_eq!(cfg.max_depth, 16);
    }
}
