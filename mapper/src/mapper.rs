use crate::{
    settings::MapperSettings, target::Target, values::collection_equals, ATTRIBUTE_PREFIX, CLAIM, PROVIDER_ID,
    USER_ATTRIBUTE,
};
use identity_broker::{
    context::BrokeredIdentityContext,
    error::BrokerError,
    mapper::IdentityProviderMapper,
    model::{MapperModel, SyncMode},
    property::{ConfigProperty, PropertyType},
    session::{Realm, Session},
    user::UserModel,
    KEYCLOAK_OIDC_PROVIDER_ID, OIDC_PROVIDER_ID,
};
use lazy_static::lazy_static;
use tracing::instrument;

const COMPATIBLE_PROVIDERS: &[&str] = &[KEYCLOAK_OIDC_PROVIDER_ID, OIDC_PROVIDER_ID];

const DISPLAY_NAME: &str = "Prefixed Attribute Importer";

lazy_static! {
    static ref CONFIG_PROPERTIES: Vec<ConfigProperty> = vec![
        ConfigProperty::new(
            CLAIM,
            "Claim",
            "Name of claim to search for in token. You can reference nested claims using a '.', i.e. 'address.locality'. To use dot (.) literally, escape it with backslash (\\.)",
            PropertyType::String,
        ),
        ConfigProperty::new(
            USER_ATTRIBUTE,
            "User Attribute Name",
            "User attribute name to store claim.  Use email, lastName, and firstName to map to those predefined user properties.",
            PropertyType::UserProfileAttributeList,
        ),
        ConfigProperty::new(
            ATTRIBUTE_PREFIX,
            "Attribute Value Prefix",
            "Prefix to be concatenated in front of every imported attribute value.",
            PropertyType::String,
        ),
    ];
}

/// Imports a claim into a user property or attribute, prefixing every value.
///
/// The reserved targets `email`, `firstName` and `lastName` receive the first value only, any
/// other target is a multi valued attribute receiving all values. A missing claim or an
/// unconfigured target never fails the login, nothing gets written instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrefixedUserAttributeMapper;

impl IdentityProviderMapper for PrefixedUserAttributeMapper {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn display_category(&self) -> &'static str {
        DISPLAY_NAME
    }

    fn display_type(&self) -> &'static str {
        DISPLAY_NAME
    }

    fn help_text(&self) -> &'static str {
        "Import declared claim if it exists in ID, access token or the claim set returned by the user profile endpoint into the specified user property or attribute and prefix each attribute value with the provided prefix."
    }

    fn config_properties(&self) -> &[ConfigProperty] {
        &CONFIG_PROPERTIES
    }

    fn compatible_providers(&self) -> &[&'static str] {
        COMPATIBLE_PROVIDERS
    }

    fn supports_sync_mode(&self, _sync_mode: SyncMode) -> bool {
        true
    }

    #[instrument(level = "debug", skip_all, fields(session = %session.id, mapper = %mapper.name), err)]
    fn preprocess_federated_identity(
        &self,
        session: &Session,
        _realm: &Realm,
        mapper: &MapperModel,
        context: &mut BrokeredIdentityContext,
    ) -> Result<(), BrokerError> {
        log::debug!("executing preprocess_federated_identity()");

        let Some(settings) = MapperSettings::from_model(mapper) else {
            log::debug!("No user attribute configured, skipping");
            return Ok(());
        };

        log::debug!("Retrieved prefix: {}", settings.prefix);

        let values = settings.prefixed_values(context);

        match settings.target {
            Target::Reserved(field) => {
                if let Some(value) = values.into_iter().next() {
                    field.apply_to_context(context, value);
                }
            }
            Target::Attribute(name) => {
                if values.is_empty() {
                    log::debug!("No values for attribute '{}'", name);
                } else {
                    context.set_user_attribute(name, values);
                }
            }
        }

        Ok(())
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(session = %session.id, mapper = %mapper.name, user = user.id()),
        err
    )]
    fn update_brokered_user(
        &self,
        session: &Session,
        _realm: &Realm,
        user: &mut dyn UserModel,
        mapper: &MapperModel,
        context: &BrokeredIdentityContext,
    ) -> Result<(), BrokerError> {
        log::debug!("executing update_brokered_user()");

        let Some(settings) = MapperSettings::from_model(mapper) else {
            log::debug!("No user attribute configured, skipping");
            return Ok(());
        };

        log::debug!("Retrieved prefix: {}", settings.prefix);

        let values = settings.prefixed_values(context);

        match settings.target {
            Target::Reserved(field) => {
                if let Some(value) = values.into_iter().next() {
                    field.apply_to_user(user, value)?;
                }
            }
            Target::Attribute(name) => {
                let current = user.attribute_values(&name);
                if values.is_empty() {
                    if !current.is_empty() {
                        log::debug!("Claim gone, removing attribute '{}'", name);
                        user.remove_attribute(&name)?;
                    }
                } else if !collection_equals(&values, &current) {
                    user.set_attribute(&name, values)?;
                } else {
                    log::debug!("Attribute '{}' unchanged", name);
                }
            }
        }

        Ok(())
    }
}
