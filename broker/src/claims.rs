//! Claim sets and claim lookup

use crate::context::BrokeredIdentityContext;
use biscuit::SingleOrMultiple;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use url::Url;

/// Claims of a token which was already validated by the broker.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,
    pub sub: String,
    pub iss: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<SingleOrMultiple<String>>,

    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    #[serde(flatten)]
    pub extended_claims: Map<String, Value>,
}

impl TokenClaims {
    /// The claims as a single JSON document, standard claims included.
    pub fn to_claim_set(&self) -> Option<Value> {
        serde_json::to_value(self)
            .map_err(|err| log::info!("Failed to serialize token claims: {}", err))
            .ok()
    }
}

/// Where a claim value was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimSource {
    AccessToken,
    IdToken,
    UserInfo,
}

impl Display for ClaimSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken => f.write_str("access token"),
            Self::IdToken => f.write_str("ID token"),
            Self::UserInfo => f.write_str("user info"),
        }
    }
}

/// A path into a claim set.
///
/// Segments are separated by `.`, and `\.` is a literal dot inside a segment: `address.locality`
/// walks into the `address` object, while `https://example\.com/roles` names a single top level
/// claim. Any other backslash is part of the segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimPath(Vec<String>);

impl ClaimPath {
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'.') => {
                    chars.next();
                    current.push('.');
                }
                '.' => segments.push(std::mem::take(&mut current)),
                c => current.push(c),
            }
        }
        segments.push(current);

        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A path without any named segment, which never resolves.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(String::is_empty)
    }

    /// Walk the claim set along the path. A `null` leaf counts as absent.
    pub fn lookup<'a>(&self, claims: &'a Value) -> Option<&'a Value> {
        if self.is_empty() {
            return None;
        }

        self.0
            .iter()
            .try_fold(claims, |current, segment| current.as_object()?.get(segment))
            .filter(|value| !value.is_null())
    }
}

impl From<&str> for ClaimPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Display for ClaimPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for c in segment.chars() {
                if c == '.' {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Resolve a claim from the context.
///
/// The access token is searched first, then the ID token and finally the user info document. The
/// first non-null value wins.
pub fn claim_value(context: &BrokeredIdentityContext, path: &ClaimPath) -> Option<Value> {
    let sources = [
        (ClaimSource::AccessToken, context.access_token().and_then(TokenClaims::to_claim_set)),
        (ClaimSource::IdToken, context.id_token().and_then(TokenClaims::to_claim_set)),
        (ClaimSource::UserInfo, context.user_info().cloned()),
    ];

    sources.into_iter().find_map(|(source, claims)| {
        let value = path.lookup(claims.as_ref()?)?;
        log::debug!("Found claim '{}' in {}", path, source);
        Some(value.clone())
    })
}
