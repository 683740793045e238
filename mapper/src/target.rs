use crate::{EMAIL, FIRST_NAME, LAST_NAME};
use identity_broker::{context::BrokeredIdentityContext, error::UserStoreError, user::UserModel};

/// A single valued identity property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReservedField {
    Email,
    FirstName,
    LastName,
}

impl ReservedField {
    pub fn apply_to_context(self, context: &mut BrokeredIdentityContext, value: String) {
        match self {
            Self::Email => context.set_email(value),
            Self::FirstName => context.set_first_name(value),
            Self::LastName => context.set_last_name(value),
        }
    }

    pub fn apply_to_user(self, user: &mut dyn UserModel, value: String) -> Result<(), UserStoreError> {
        match self {
            Self::Email => user.set_email(value),
            Self::FirstName => user.set_first_name(value),
            Self::LastName => user.set_last_name(value),
        }
    }
}

/// Where imported values end up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Receives the first value only
    Reserved(ReservedField),
    /// Receives all values
    Attribute(String),
}

impl Target {
    /// Resolve the configured target name, reserved names match case-insensitively.
    ///
    /// An empty name is no target.
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        let reserved = [
            (EMAIL, ReservedField::Email),
            (FIRST_NAME, ReservedField::FirstName),
            (LAST_NAME, ReservedField::LastName),
        ];

        Some(
            reserved
                .into_iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
                .map(|(_, field)| Self::Reserved(field))
                .unwrap_or_else(|| Self::Attribute(name.to_string())),
        )
    }
}
