//! Defining mapper instances, from a file or from the command line

use crate::{ATTRIBUTE_PREFIX, CLAIM, PROVIDER_ID, USER_ATTRIBUTE};
use identity_broker::model::{MapperModel, SyncMode};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, clap::Args)]
#[command(
    rename_all_env = "SCREAMING_SNAKE_CASE",
    next_help_heading = "Prefixed attribute mapper"
)]
pub struct MapperConfigArguments {
    /// Location of the mapper configuration file
    #[arg(
        id = "mapper-configuration",
        long = "mapper-configuration",
        env = "MAPPER_CONFIGURATION",
        conflicts_with_all = ["claim", "user-attribute", "attribute-prefix"]
    )]
    pub config: Option<PathBuf>,

    /// Name of the mapper instance
    #[arg(id = "mapper-name", long = "mapper-name", env = "MAPPER_NAME", default_value = "prefixed-attribute")]
    pub name: String,

    /// Alias of the identity provider the mapper is attached to
    #[arg(
        id = "identity-provider-alias",
        long = "identity-provider-alias",
        env = "MAPPER_IDENTITY_PROVIDER_ALIAS",
        default_value = "oidc"
    )]
    pub identity_provider_alias: String,

    /// Claim to import, nested claims are separated by '.', a literal dot is escaped as '\.'
    #[arg(id = "claim", long = "claim", env = "MAPPER_CLAIM")]
    pub claim: Option<String>,

    /// User attribute receiving the claim, use email, firstName or lastName for the user's properties
    #[arg(id = "user-attribute", long = "user-attribute", env = "MAPPER_USER_ATTRIBUTE")]
    pub user_attribute: Option<String>,

    /// Prefix put in front of every imported value
    #[arg(id = "attribute-prefix", long = "attribute-prefix", env = "MAPPER_ATTRIBUTE_PREFIX")]
    pub attribute_prefix: Option<String>,

    /// When to re-apply the claim to existing users
    #[arg(id = "sync-mode", long = "sync-mode", env = "MAPPER_SYNC_MODE")]
    pub sync_mode: Option<SyncMode>,
}

/// A mapper instance, as stored in a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrefixedAttributeMapperConfig {
    pub name: String,

    pub identity_provider_alias: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub claim: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_attribute: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attribute_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_mode: Option<SyncMode>,
}

impl PrefixedAttributeMapperConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_reader(std::fs::File::open(path)?)?)
    }
}

impl From<PrefixedAttributeMapperConfig> for MapperModel {
    fn from(value: PrefixedAttributeMapperConfig) -> Self {
        let mut config = HashMap::from([
            (CLAIM.to_string(), value.claim),
            (USER_ATTRIBUTE.to_string(), value.user_attribute),
            (ATTRIBUTE_PREFIX.to_string(), value.attribute_prefix),
        ]);

        if let Some(sync_mode) = value.sync_mode {
            config.insert(MapperModel::SYNC_MODE.to_string(), sync_mode.to_string());
        }

        MapperModel {
            id: String::new(),
            name: value.name,
            identity_provider_alias: value.identity_provider_alias,
            identity_provider_mapper: PROVIDER_ID.to_string(),
            config,
        }
    }
}

impl MapperConfigArguments {
    /// Build the mapper instance, either from the configuration file or from the arguments.
    pub fn into_model(self) -> anyhow::Result<MapperModel> {
        let config = match self.config {
            Some(path) => {
                log::debug!("Loading mapper configuration from: {}", path.display());
                PrefixedAttributeMapperConfig::from_file(path)?
            }
            None => PrefixedAttributeMapperConfig {
                name: self.name,
                identity_provider_alias: self.identity_provider_alias,
                claim: self.claim.unwrap_or_default(),
                user_attribute: self.user_attribute.unwrap_or_default(),
                attribute_prefix: self.attribute_prefix.unwrap_or_default(),
                sync_mode: self.sync_mode,
            },
        };

        if config.user_attribute.is_empty() {
            log::warn!("Mapper '{}' has no user attribute, it will not import anything", config.name);
        }

        Ok(config.into())
    }
}
