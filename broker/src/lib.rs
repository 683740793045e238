//! The extension contract between an identity broker and the mappers it runs during federated login.

pub mod claims;
pub mod context;
pub mod error;
pub mod mapper;
pub mod model;
pub mod property;
pub mod session;
pub mod user;

/// Provider id of the Keycloak flavoured OpenID Connect identity provider
pub const KEYCLOAK_OIDC_PROVIDER_ID: &str = "keycloak-oidc";
/// Provider id of the generic OpenID Connect identity provider
pub const OIDC_PROVIDER_ID: &str = "oidc";
/// Wildcard, a mapper declaring it is compatible with every provider
pub const ANY_PROVIDER: &str = "*";
