//! Service configuration, layered from built-in defaults, an optional `grocery.{toml,yaml,json}`
//! file and `GROCERY__*` environment variables (`GROCERY__STORE__CHANNEL_CAPACITY=64`).

use config::{Config, ConfigError, Environment, File};
use resource_framework::ServiceSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroceryConfig {
    pub store: StoreConfig,
    pub format: FormatConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Request channel capacity of each store actor.
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Decimal places kept on prices and amounts.
    pub amount_decimals: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { amount_decimals: 2 }
    }
}

impl GroceryConfig {
    /// Load configuration from the `grocery` file (if any) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("grocery")
    }

    /// Same as [`GroceryConfig::load`] with another file stem.
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&GroceryConfig::default())?)
            .add_source(File::with_name(file_stem).required(false))
            .add_source(
                Environment::with_prefix("GROCERY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            amount_decimals: self.format.amount_decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GroceryConfig::default();
        assert_eq!(config.store.channel_capacity, 32);
        assert_eq!(config.settings(), ServiceSettings { amount_decimals: 2 });
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GroceryConfig::load_from("no-such-grocery-config-file").unwrap();
        assert_eq!(config, GroceryConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("grocery-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("grocery.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[format]\namount_decimals = 3").unwrap();

        let stem = dir.join("grocery");
        let config = GroceryConfig::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(config.format.amount_decimals, 3);
        assert_eq!(config.store.channel_capacity, 32);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
