//! Configuration for catalog lookups.

use std::collections::HashMap;
use std::path::Path;

use config::{Config as HierarchicalConfig, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{EndpointQuery, Interface};

/// Conventional name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "keystone.toml";

/// Prefix of the environment variables read on top of the file
/// (`OS_REGION_NAME`, `OS_INTERFACE`, ...).
const ENV_PREFIX: &str = "OS";

/// Client side defaults for catalog queries.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "RawCatalogConfig")]
pub struct CatalogConfig {
    /// Region that replaces the authentication response's region hint.
    pub region_name: Option<String>,

    /// Interface used when a query doesn't name one.
    ///
    /// Read from `interface`, or the legacy `endpoint_type` key when that is
    /// the only one set. Both accept the `...URL` spellings.
    pub interface: Interface,
}

/// Keys as they appear in the file and environment.
///
/// `interface` takes precedence over `endpoint_type` when both are set.
#[derive(Debug, Deserialize)]
struct RawCatalogConfig {
    #[serde(default)]
    region_name: Option<String>,
    #[serde(default)]
    interface: Option<Interface>,
    #[serde(default)]
    endpoint_type: Option<Interface>,
}

impl From<RawCatalogConfig> for CatalogConfig {
    fn from(raw: RawCatalogConfig) -> Self {
        Self {
            region_name: raw.region_name,
            interface: raw.interface.or(raw.endpoint_type).unwrap_or_default(),
        }
    }
}

impl CatalogConfig {
    /// Read the configuration from an optional TOML file, overridden by
    /// `OS_*` variables of the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`CatalogConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = HierarchicalConfig::builder();

        if let Some(path) = config_file {
            debug!(path = %path.display(), "reading catalog configuration");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .source(env),
        );

        let config: CatalogConfig = builder.build()?.try_deserialize()?;
        debug!(?config, "loaded catalog configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text alone.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config = HierarchicalConfig::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// A query pre-filled with the configured interface.
    pub fn query(&self) -> EndpointQuery {
        EndpointQuery::new().interface(self.interface)
    }
}
