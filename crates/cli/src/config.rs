//! Configuration loading from capctl.toml.

use capability::{CapabilitiesSpec, CapabilitySet, Catalog};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Capabilities observed active on the cluster.
    #[serde(default)]
    pub observed: CapabilitySet,

    /// Declared capability selection. Absent means the catalog's current set.
    pub capabilities: Option<CapabilitiesSpec>,

    /// Custom catalog. The built-in release catalog is used when absent.
    pub catalog: Option<Catalog>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    ///
    /// A custom catalog must define its own current set.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The catalog to resolve against.
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_else(Catalog::builtin)
    }

    /// Replace the catalog, checking it like one read from the config file.
    pub fn with_catalog(mut self, catalog: Catalog) -> Result<Self, ConfigError> {
        self.catalog = Some(catalog);
        self.validate()?;
        Ok(self)
    }

    /// Baseline set named in the config that the catalog does not define.
    ///
    /// Allowed, but it enables nothing from the catalog.
    pub fn unknown_baseline(&self) -> Option<&str> {
        let baseline = self
            .capabilities
            .as_ref()?
            .baseline_capability_set
            .as_deref()
            .filter(|name| !name.is_empty())?;
        (!self.catalog().contains_set(baseline)).then_some(baseline)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(catalog) = &self.catalog {
            if !catalog.contains_set(&catalog.current) {
                return Err(ConfigError::MissingCurrentSet(catalog.current.clone()));
            }
        }

        if let Some(baseline) = self.unknown_baseline() {
            warn!(baseline, "baseline capability set not in catalog");
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("catalog current set '{0}' is not defined in catalog.sets")]
    MissingCurrentSet(String),
}
