use crate::{ConfigError, ConfigErrorResult, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

use serde::Deserialize;

/// Page-size bounds for listing endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller supplies none (or garbage).
    pub default_limit: u32,
    /// Hard cap on caller-supplied page sizes.
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.default_limit < 1 {
            return Err(ConfigError::pagination(
                "pagination.default_limit must be >= 1",
            ));
        }

        if self.max_limit < self.default_limit {
            return Err(ConfigError::pagination(format!(
                "pagination.max_limit must be >= pagination.default_limit ({}), got {}",
                self.default_limit, self.max_limit
            )));
        }

        Ok(())
    }
}
