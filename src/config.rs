use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::model::ItemKind;
use crate::ordering::DEFAULT_STEP;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Hosted row-store backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Position increments used when appending ordered rows
    #[serde(default)]
    pub ordering: OrderingSteps,
}

/// Connection settings for the hosted row-store backend
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the REST backend (e.g., "https://project.example.co")
    #[serde(default)]
    pub base_url: String,
    /// API key sent with every request (can also be set via environment variable)
    #[serde(default)]
    pub api_key: String,
    /// Acting owner identity for the CLI; library callers pass their own
    #[serde(default)]
    pub owner_id: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            owner_id: String::new(),
            timeout: default_timeout(),
        }
    }
}

/// Per-entity append increments for the ordinal position scheme.
///
/// Historically one instructions code path stepped by 1 while every other
/// append stepped by 10; the step is configurable here and defaults to 10
/// for all three kinds.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct OrderingSteps {
    #[serde(default = "default_step")]
    pub ingredients: i64,
    #[serde(default = "default_step")]
    pub instructions: i64,
    #[serde(default = "default_step")]
    pub tips: i64,
}

impl Default for OrderingSteps {
    fn default() -> Self {
        Self {
            ingredients: default_step(),
            instructions: default_step(),
            tips: default_step(),
        }
    }
}

impl OrderingSteps {
    pub fn for_kind(&self, kind: ItemKind) -> i64 {
        match kind {
            ItemKind::Ingredient => self.ingredients,
            ItemKind::Instruction => self.instructions,
            ItemKind::Tip => self.tips,
        }
    }
}

fn default_step() -> i64 {
    DEFAULT_STEP
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKDESK__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKDESK__BACKEND__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: COOKDESK__BACKEND__BASE_URL
            .add_source(
                Environment::with_prefix("COOKDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_step(), 10);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_ordering_steps_default() {
        let steps = OrderingSteps::default();
        assert_eq!(steps.ingredients, 10);
        assert_eq!(steps.instructions, 10);
        assert_eq!(steps.tips, 10);
        assert_eq!(steps.for_kind(ItemKind::Instruction), 10);
    }

    #[test]
    fn test_backend_config_default() {
        let backend = BackendConfig::default();
        assert!(backend.base_url.is_empty());
        assert!(backend.api_key.is_empty());
        assert_eq!(backend.timeout, 30);
    }

    #[test]
    fn test_app_config_structure() {
        let config = AppConfig {
            backend: BackendConfig {
                base_url: "https://project.example.co".to_string(),
                api_key: "service-key".to_string(),
                owner_id: "user-1".to_string(),
                timeout: 10,
            },
            ordering: OrderingSteps {
                ingredients: 10,
                instructions: 1,
                tips: 10,
            },
        };

        assert_eq!(config.backend.timeout, 10);
        assert_eq!(config.ordering.for_kind(ItemKind::Instruction), 1);
        assert_eq!(config.ordering.for_kind(ItemKind::Ingredient), 10);
    }
}
