use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::io;

/// Custom error types for the CMS application
#[derive(Debug)]
pub enum CmsError {
    Io(io::Error),
    NotFound,
    InvalidName,
    Hash(bcrypt::BcryptError),
    CredentialStore(String),
}

impl From<io::Error> for CmsError {
    fn from(err: io::Error) -> Self {
        CmsError::Io(err)
    }
}

impl From<bcrypt::BcryptError> for CmsError {
    fn from(err: bcrypt::BcryptError) -> Self {
        CmsError::Hash(err)
    }
}

impl From<toml::de::Error> for CmsError {
    fn from(err: toml::de::Error) -> Self {
        CmsError::CredentialStore(err.to_string())
    }
}

impl From<toml::ser::Error> for CmsError {
    fn from(err: toml::ser::Error) -> Self {
        CmsError::CredentialStore(err.to_string())
    }
}

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        match self {
            CmsError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            CmsError::InvalidName => (StatusCode::BAD_REQUEST, "Invalid name").into_response(),
            CmsError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("I/O error: {}", e),
            )
                .into_response(),
            CmsError::Hash(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Password hash error: {}", e),
            )
                .into_response(),
            CmsError::CredentialStore(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Credential store error: {}", e),
            )
                .into_response(),
        }
    }
}
