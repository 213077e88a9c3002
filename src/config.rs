//! Kitchen configuration.
//!
//! ```toml
//! dispatch_on_submit = false
//!
//! [slots]
//! total = 5
//! quick = 3
//! slow = 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::DishCategory;
use crate::validation::validate_quota;

/// Cooking slot limits.
///
/// `quick` and `slow` are independent sub-quotas, each at most `total`;
/// an admission must fit both its sub-quota and the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotQuota {
    pub total: usize,
    pub quick: usize,
    pub slow: usize,
}

impl SlotQuota {
    /// Creates a quota. Not validated; see [`validate_quota`].
    pub fn new(total: usize, quick: usize, slow: usize) -> Self {
        Self { total, quick, slow }
    }

    /// Sub-quota for a category.
    pub fn for_category(&self, category: DishCategory) -> usize {
        match category {
            DishCategory::Quick => self.quick,
            DishCategory::Slow => self.slow,
        }
    }
}

impl Default for SlotQuota {
    fn default() -> Self {
        Self {
            total: 5,
            quick: 3,
            slow: 2,
        }
    }
}

/// Scheduler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    pub slots: SlotQuota,
    /// Run a board fill right after every accepted intake.
    pub dispatch_on_submit: bool,
}

impl KitchenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot quota.
    pub fn with_slots(mut self, slots: SlotQuota) -> Self {
        self.slots = slots;
        self
    }

    /// Enables or disables fill-on-submit.
    pub fn with_dispatch_on_submit(mut self, enabled: bool) -> Self {
        self.dispatch_on_submit = enabled;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Checks the slot quota.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_quota(&self.slots).map_err(|errors| {
            ConfigError::InvalidQuota(
                errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })
    }
}
