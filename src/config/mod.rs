//! Configuration loading and management
//!
//! The admin server reads one YAML document: listen address, log filter,
//! ACL switch and the seed rows the in-memory repositories start with.
//! `ADMIN_HOST`, `ADMIN_PORT` and `RUST_LOG` override the file.

use crate::core::error::ConfigError;
use crate::entities::{Category, Country, PaymentMethod, Privilege, Resource, Role, Rule, Shop};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Listen address of the HTTP server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Log filter, in `tracing_subscriber::EnvFilter` syntax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info,tower_http=debug".to_string()
}

/// Whether payment actions are checked against the ACL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AclConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Rows loaded into the repositories at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub countries: Vec<Country>,

    #[serde(default)]
    pub shops: Vec<Shop>,

    #[serde(default)]
    pub payments: Vec<PaymentMethod>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(default)]
    pub privileges: Vec<Privilege>,

    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Complete configuration of the admin server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub acl: AclConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::ParseError {
                file: None,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Apply `ADMIN_HOST`, `ADMIN_PORT` and `RUST_LOG` from the environment
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ADMIN_HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }

        if let Some(port) = lookup("ADMIN_PORT") {
            self.server.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    field: "server.port".to_string(),
                    value: port.clone(),
                    message: e.to_string(),
                }
            })?;
        }

        if let Some(filter) = lookup("RUST_LOG").filter(|f| !f.trim().is_empty()) {
            self.logging.filter = filter;
        }

        Ok(self)
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Create a default configuration with a small demo catalog
    pub fn default_config() -> Self {
        Self::from_yaml_str(DEFAULT_CONFIG).unwrap_or_default()
    }
}

const DEFAULT_CONFIG: &str = r#"
server:
  host: 127.0.0.1
  port: 3000
logging:
  filter: info,tower_http=debug
acl:
  enabled: false
seed:
  countries:
    - { id: 2, name: Deutschland, iso: DE, iso3: DEU, active: true, position: 1 }
    - { id: 23, name: Österreich, iso: AT, iso3: AUT, active: true, position: 2 }
    - { id: 26, name: Schweiz, iso: CH, iso3: CHE, active: false, position: 3 }
  shops:
    - { id: 1, name: Demoshop, host: localhost, active: true }
  payments:
    - id: 2
      name: debit
      description: Lastschrift
      template: debit.tpl
      class: debit.php
      table: s_user_debit
      debitPercent: "-10"
      position: 4
      countries: [2]
      shops: [1]
    - id: 3
      name: cash
      description: Nachnahme
      template: cash.tpl
      class: cash.php
      surchargeString: "DE:2.00;AT:4.50"
      position: 2
      active: true
      countries: [2, 23]
      shops: [1]
    - id: 4
      name: invoice
      description: Rechnung
      template: invoice.tpl
      class: invoice.php
      surcharge: "5"
      position: 3
      active: true
      shops: [1]
    - id: 5
      name: prepayment
      description: Vorkasse
      template: prepayment.tpl
      class: prepayment.php
      position: 1
      active: true
      countries: [2, 23, 26]
      shops: [1]
  categories:
    - { id: 1, description: Root, position: 0, active: true }
    - { id: 3, parentId: 1, description: Deutsch, position: 0, active: true }
    - { id: 5, parentId: 3, description: Genuss & Angebote, position: 2, active: true }
    - { id: 6, parentId: 3, description: Sommerwelten, position: 1, active: true }
    - { id: 8, parentId: 3, description: Wohnwelten, position: 0, active: true }
  roles:
    - { id: 1, name: local_admins, description: Default group that gains access to all shop functions, admin: true }
  resources:
    - { id: 1, name: payment }
  privileges:
    - { id: 1, resourceID: 1, name: read }
    - { id: 2, resourceID: 1, name: create }
    - { id: 3, resourceID: 1, name: update }
    - { id: 4, resourceID: 1, name: delete }
"#;
