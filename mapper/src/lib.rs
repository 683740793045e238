//! An identity provider mapper, importing a claim into a user property or attribute and
//! prefixing every imported value.

pub mod config;
mod mapper;
pub mod settings;
pub mod target;
pub mod values;

pub use mapper::PrefixedUserAttributeMapper;

/// Id of the mapper implementation
pub const PROVIDER_ID: &str = "oidc-prefixed-user-attribute-idp-mapper";

/// Config key of the claim path
pub const CLAIM: &str = "claim";
/// Config key of the target user property or attribute
pub const USER_ATTRIBUTE: &str = "user.attribute";
/// Config key of the value prefix
pub const ATTRIBUTE_PREFIX: &str = "attribute.prefix";

/// Reserved target, the user's email
pub const EMAIL: &str = "email";
/// Reserved target, the user's first name
pub const FIRST_NAME: &str = "firstName";
/// Reserved target, the user's last name
pub const LAST_NAME: &str = "lastName";
