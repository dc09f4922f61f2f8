//! Configuration for the type resolver.

use crate::error::{ResolveError, ResolveResult};
use serde::{Deserialize, Serialize};

/// Default bound on the number of hierarchy levels a single walk may visit
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for a [`TypeResolver`](crate::TypeResolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of hierarchy levels walked from leaf to ancestor.
    ///
    /// Guards against providers whose supertype links form a cycle.
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum walk depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> ResolveResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ResolveError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ResolveResult<()> {
        if self.max_depth == 0 {
            return Err(ResolveError::InvalidConfig(
                "max_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
