/// Error shape reported to the admin console.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorInformation {
    pub error: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Failure of the broker's user store.
#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Attribute is read-only: {0}")]
    ReadOnly(String),
    #[error("Failed to store user")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
}

impl From<&BrokerError> for ErrorInformation {
    fn from(err: &BrokerError) -> Self {
        match err {
            BrokerError::UserStore(_) => ErrorInformation {
                error: "UserStore".to_string(),
                message: err.to_string(),
            },
        }
    }
}
