use serde::Serialize;
use thiserror::Error;

/// App-level error taxonomy. Every variant renders as a one-line,
/// user-facing description; nothing here is meant for programmatic
/// recovery beyond matching the variant.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Can’t access the music service because permission was denied. Please enable access for this app in your system’s privacy settings.")]
    AuthorizationDenied,

    #[error("Can’t access the music service because of system restrictions. If this device belongs to a workplace or school, please contact your administrator.")]
    AuthorizationRestricted,

    #[error("Can’t access the music service because of an unknown problem. Please update the app and try again.")]
    AuthorizationUnknown,

    #[error("Gave up requesting music service access after too many attempts.")]
    TooManyAttempts,

    #[error("The album doesn't contain any songs")]
    EmptyAlbum,

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// True for the variants produced by the access gate. These take
    /// display precedence over both error channels.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            AppError::AuthorizationDenied
                | AppError::AuthorizationRestricted
                | AppError::AuthorizationUnknown
                | AppError::TooManyAttempts
        )
    }
}

// Causes from outside the taxonomy (transport failures, engine errors) are
// flattened to their display string so the error slots stay cloneable and
// serializable.

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Other(format!("Serialization error: {}", e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Other(format!("File system error: {}", e))
    }
}
