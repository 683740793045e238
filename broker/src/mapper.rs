//! The identity provider mapper extension point

use crate::{
    context::BrokeredIdentityContext,
    error::BrokerError,
    model::{MapperModel, SyncMode},
    property::ConfigProperty,
    session::{Realm, Session},
    user::UserModel,
    ANY_PROVIDER,
};
use serde::Serialize;

/// Transfers data from an external identity into local users.
///
/// The broker calls [`IdentityProviderMapper::preprocess_federated_identity`] before a user is
/// imported for the first time, and [`IdentityProviderMapper::update_brokered_user`] on later
/// logins, as permitted by the mapper's [`SyncMode`].
pub trait IdentityProviderMapper: Send + Sync {
    fn id(&self) -> &'static str;

    fn display_category(&self) -> &'static str;
    fn display_type(&self) -> &'static str;
    fn help_text(&self) -> &'static str;

    fn config_properties(&self) -> &[ConfigProperty];

    /// Ids of the identity providers this mapper can be attached to.
    fn compatible_providers(&self) -> &[&'static str];

    fn supports_sync_mode(&self, sync_mode: SyncMode) -> bool;

    fn is_compatible_with(&self, provider_id: &str) -> bool {
        self.compatible_providers()
            .iter()
            .any(|id| *id == ANY_PROVIDER || *id == provider_id)
    }

    fn preprocess_federated_identity(
        &self,
        session: &Session,
        realm: &Realm,
        mapper: &MapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> Result<(), BrokerError>;

    fn update_brokered_user(
        &self,
        session: &Session,
        realm: &Realm,
        user: &mut dyn UserModel,
        mapper: &MapperModel,
        context: &BrokeredIdentityContext,
    ) -> Result<(), BrokerError>;
}

/// What the admin console needs to know about a mapper implementation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperDescriptor {
    pub id: String,
    pub category: String,
    pub name: String,
    pub help_text: String,
    pub properties: Vec<ConfigProperty>,
    pub compatible_providers: Vec<String>,
    pub sync_modes: Vec<SyncMode>,
}

impl MapperDescriptor {
    pub fn of(mapper: &dyn IdentityProviderMapper) -> Self {
        Self {
            id: mapper.id().to_string(),
            category: mapper.display_category().to_string(),
            name: mapper.display_type().to_string(),
            help_text: mapper.help_text().to_string(),
            properties: mapper.config_properties().to_vec(),
            compatible_providers: mapper
                .compatible_providers()
                .iter()
                .map(ToString::to_string)
                .collect(),
            sync_modes: SyncMode::ALL
                .into_iter()
                .filter(|mode| mapper.supports_sync_mode(*mode))
                .collect(),
        }
    }
}
