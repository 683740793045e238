//! The identity being brokered during a federated login.

use crate::claims::TokenClaims;
use serde_json::Value;
use std::collections::BTreeMap;

/// Transient state of a user being imported from an external identity provider.
///
/// Holds the claim sources the provider handed out, and the identity properties mappers fill in
/// before the broker persists the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrokeredIdentityContext {
    id: String,
    identity_provider_alias: String,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    attributes: BTreeMap<String, Vec<String>>,

    access_token: Option<TokenClaims>,
    id_token: Option<TokenClaims>,
    user_info: Option<Value>,
}

impl BrokeredIdentityContext {
    /// Create a new context for the user with the given id at the external provider.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_identity_provider_alias(mut self, alias: impl Into<String>) -> Self {
        self.identity_provider_alias = alias.into();
        self
    }

    pub fn with_access_token(mut self, claims: TokenClaims) -> Self {
        self.access_token = Some(claims);
        self
    }

    pub fn with_id_token(mut self, claims: TokenClaims) -> Self {
        self.id_token = Some(claims);
        self
    }

    pub fn with_user_info(mut self, user_info: Value) -> Self {
        self.user_info = Some(user_info);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn identity_provider_alias(&self) -> &str {
        &self.identity_provider_alias
    }

    pub fn access_token(&self) -> Option<&TokenClaims> {
        self.access_token.as_ref()
    }

    pub fn id_token(&self) -> Option<&TokenClaims> {
        self.id_token.as_ref()
    }

    pub fn user_info(&self) -> Option<&Value> {
        self.user_info.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = Some(first_name.into());
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = Some(last_name.into());
    }

    /// Replace all values of an attribute.
    pub fn set_user_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }

    pub fn user_attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.attributes
    }
}
