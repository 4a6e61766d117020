//! Configuration module for the storefront API.
//!
//! Provides configuration loading and validation for the server binding,
//! the delivery schedule policy, and the seeded catalog. The delivery rules
//! (blocked weekdays, time slots, regions) are deployment data, so they live
//! here rather than in code; the defaults reproduce the reference
//! deployment.
//!
//! # Usage
//!
//! ```rust,ignore
//! use storefront_api::config::load_config;
//!
//! // Load from default path (config.yaml) or fall back to defaults
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file path.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Delivery schedule policy data.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Catalog seeding.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delivery.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server port for REST endpoints (/health, /api/v1/*).
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
        }
    }
}

const fn default_http_port() -> u16 {
    8080
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Delivery schedule policy data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Selectable delivery time slots.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,
    /// Selectable delivery regions.
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    /// Weekday names on which delivery is not offered.
    #[serde(default = "default_blocked_weekdays")]
    pub blocked_weekdays: Vec<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            time_slots: default_time_slots(),
            regions: default_regions(),
            blocked_weekdays: default_blocked_weekdays(),
        }
    }
}

impl DeliveryConfig {
    /// Parse the configured blocked weekday names.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unparseable weekday name.
    pub fn blocked_weekdays(&self) -> Result<Vec<Weekday>, ConfigError> {
        self.blocked_weekdays
            .iter()
            .map(|name| {
                name.parse::<Weekday>().map_err(|_| {
                    ConfigError::ValidationError(format!("Unknown weekday name: '{name}'"))
                })
            })
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.time_slots.is_empty() {
            return Err(ConfigError::ValidationError(
                "delivery.time_slots must not be empty".to_string(),
            ));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::ValidationError(
                "delivery.regions must not be empty".to_string(),
            ));
        }
        let blocked = self.blocked_weekdays()?;
        if blocked.len() >= 7 {
            return Err(ConfigError::ValidationError(
                "delivery.blocked_weekdays cannot block every day of the week".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_time_slots() -> Vec<String> {
    ["10 AM", "11 AM", "12 PM"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_regions() -> Vec<String> {
    [
        "Colombo",
        "Gampaha",
        "Kalutara",
        "Kandy",
        "Matale",
        "Nuwara Eliya",
        "Galle",
        "Matara",
        "Hambantota",
        "Jaffna",
        "Kilinochchi",
        "Mannar",
        "Vavuniya",
        "Mullaitivu",
        "Batticaloa",
        "Ampara",
        "Trincomalee",
        "Kurunegala",
        "Puttalam",
        "Anuradhapura",
        "Polonnaruwa",
        "Badulla",
        "Moneragala",
        "Ratnapura",
        "Kegalle",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_blocked_weekdays() -> Vec<String> {
    vec!["Sunday".to_string()]
}

/// Catalog seeding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products inserted into the catalog at startup.
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for seed in &self.products {
            if seed.price <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "catalog product '{}' must have a positive price",
                    seed.id
                )));
            }
        }
        Ok(())
    }
}

/// One seeded catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSeed {
    /// Product identifier.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Initial stock.
    pub stock: u32,
    /// Whether the product is purchasable.
    #[serde(default = "default_true")]
    pub active: bool,
}

const fn default_true() -> bool {
    true
}

/// Load configuration from a YAML file.
///
/// With no explicit path, reads `config.yaml` if present and falls back to
/// built-in defaults otherwise.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or if validation
/// fails.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_PATH).exists() {
                read_config(DEFAULT_CONFIG_PATH)?
            } else {
                Config::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

fn read_config(path: &str) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;
    Ok(serde_yaml_bw::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.delivery.time_slots.len(), 3);
        assert_eq!(config.delivery.regions.len(), 25);
        assert_eq!(config.delivery.blocked_weekdays, vec!["Sunday"]);
        assert!(config.catalog.products.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blocked_weekdays_parse() {
        let config = DeliveryConfig::default();
        assert_eq!(config.blocked_weekdays().unwrap(), vec![Weekday::Sun]);
    }

    #[test]
    fn unknown_weekday_fails_validation() {
        let config = Config {
            delivery: DeliveryConfig {
                blocked_weekdays: vec!["Caturday".to_string()],
                ..DeliveryConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_time_slots_fail_validation() {
        let config = Config {
            delivery: DeliveryConfig {
                time_slots: vec![],
                ..DeliveryConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blocking_every_weekday_fails_validation() {
        let config = Config {
            delivery: DeliveryConfig {
                blocked_weekdays: [
                    "Monday",
                    "Tuesday",
                    "Wednesday",
                    "Thursday",
                    "Friday",
                    "Saturday",
                    "Sunday",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                ..DeliveryConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_yaml_with_partial_overrides() {
        let yaml = r#"
server:
  http_port: 9090
delivery:
  blocked_weekdays: ["Sunday", "Saturday"]
catalog:
  products:
    - id: prod-1
      name: Ceylon Tea 500g
      price: 10.0
      stock: 25
"#;
        let config: Config = serde_yaml_bw::from_str(yaml).unwrap();
        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.delivery.blocked_weekdays.len(), 2);
        // Untouched sections keep their defaults
        assert_eq!(config.delivery.time_slots.len(), 3);
        assert_eq!(config.catalog.products.len(), 1);
        assert!(config.catalog.products[0].active);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_seed_price_fails_validation() {
        let config = Config {
            catalog: CatalogConfig {
                products: vec![ProductSeed {
                    id: "prod-1".to_string(),
                    name: "Freebie".to_string(),
                    price: 0.0,
                    stock: 1,
                    active: true,
                }],
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
