//! Stored mapper definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// When a mapper re-applies external data to an already imported user.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Keep the behavior the mapper had before sync modes existed
    #[default]
    Legacy,
    /// Apply only when the user is first imported
    Import,
    /// Apply on every login
    Force,
}

impl SyncMode {
    pub const ALL: [SyncMode; 3] = [SyncMode::Legacy, SyncMode::Import, SyncMode::Force];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Import => "import",
            Self::Force => "force",
        }
    }
}

impl Display for SyncMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown sync mode: {0}")]
pub struct UnknownSyncMode(pub String);

impl FromStr for SyncMode {
    type Err = UnknownSyncMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyncMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSyncMode(s.to_string()))
    }
}

/// A mapper instance configured for one identity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperModel {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub identity_provider_alias: String,
    /// Id of the mapper implementation
    pub identity_provider_mapper: String,
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl MapperModel {
    /// Config key holding the sync mode
    pub const SYNC_MODE: &'static str = "syncMode";

    pub fn config_value(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    pub fn sync_mode(&self) -> SyncMode {
        match self.config_value(Self::SYNC_MODE) {
            Some(value) => value.parse().unwrap_or_else(|err| {
                log::warn!("Mapper '{}': {}, falling back to {}", self.name, err, SyncMode::default());
                SyncMode::default()
            }),
            None => SyncMode::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("legacy", SyncMode::Legacy)]
    #[case("IMPORT", SyncMode::Import)]
    #[case("Force", SyncMode::Force)]
    fn test_parse_sync_mode(#[case] value: &str, #[case] expected: SyncMode) {
        assert_eq!(value.parse::<SyncMode>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown_sync_mode() {
        assert_eq!("sometimes".parse::<SyncMode>(), Err(UnknownSyncMode("sometimes".into())));
    }

    #[test]
    fn test_model_sync_mode() {
        let mut model = MapperModel {
            name: "city".into(),
            ..Default::default()
        };
        assert_eq!(model.sync_mode(), SyncMode::Legacy);

        model.config.insert(MapperModel::SYNC_MODE.into(), "FORCE".into());
        assert_eq!(model.sync_mode(), SyncMode::Force);

        model.config.insert(MapperModel::SYNC_MODE.into(), "never".into());
        assert_eq!(model.sync_mode(), SyncMode::Legacy);
    }

    #[test]
    fn test_deserialize_model() {
        let model: MapperModel = serde_json::from_value(serde_json::json!({
            "name": "city",
            "identityProviderAlias": "corp",
            "identityProviderMapper": "some-mapper",
            "config": { "claim": "address.locality", "syncMode": "import" }
        }))
        .expect("valid model");

        assert_eq!(model.id, "");
        assert_eq!(model.config_value("claim"), Some("address.locality"));
        assert_eq!(model.config_value("missing"), None);
        assert_eq!(model.sync_mode(), SyncMode::Import);
    }
}
