//! Structures to work with local users.

use crate::error::UserStoreError;
use std::collections::BTreeMap;

/// A local user, as persisted by the broker.
///
/// Writes may fail, when the broker's store rejects them. Mappers must not swallow those errors.
pub trait UserModel {
    fn id(&self) -> &str;

    fn set_email(&mut self, email: String) -> Result<(), UserStoreError>;
    fn set_first_name(&mut self, first_name: String) -> Result<(), UserStoreError>;
    fn set_last_name(&mut self, last_name: String) -> Result<(), UserStoreError>;

    /// Current values of an attribute, empty if the user doesn't have it.
    fn attribute_values(&self, name: &str) -> Vec<String>;
    /// Replace all values of an attribute.
    fn set_attribute(&mut self, name: &str, values: Vec<String>) -> Result<(), UserStoreError>;
    fn remove_attribute(&mut self, name: &str) -> Result<(), UserStoreError>;
}

/// A user held in memory, e.g. before handing it over to a store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl InMemoryUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl UserModel for InMemoryUser {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_email(&mut self, email: String) -> Result<(), UserStoreError> {
        self.email = Some(email);
        Ok(())
    }

    fn set_first_name(&mut self, first_name: String) -> Result<(), UserStoreError> {
        self.first_name = Some(first_name);
        Ok(())
    }

    fn set_last_name(&mut self, last_name: String) -> Result<(), UserStoreError> {
        self.last_name = Some(last_name);
        Ok(())
    }

    fn attribute_values(&self, name: &str) -> Vec<String> {
        self.attributes.get(name).cloned().unwrap_or_default()
    }

    fn set_attribute(&mut self, name: &str, values: Vec<String>) -> Result<(), UserStoreError> {
        // an empty list is no value at all
        if values.is_empty() {
            self.attributes.remove(name);
        } else {
            self.attributes.insert(name.to_string(), values);
        }
        Ok(())
    }

    fn remove_attribute(&mut self, name: &str) -> Result<(), UserStoreError> {
        self.attributes.remove(name);
        Ok(())
    }
}
