//! Handles the broker passes through to mappers.

/// The request the broker is currently processing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

/// The realm owning the identity provider and the users.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Realm {
    pub name: String,
}

impl Realm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
