use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

pub const HOSPITAL_LOGIN_FAILED: &str = "Invalid hospital credentials. Please check name and password.";
pub const USER_LOGIN_FAILED: &str = "Invalid username or password.";

#[derive(Error, Debug)]
pub enum AuthError {
    /// Form validation; nothing was sent to the API.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => AppError::ValidationError(msg),
            AuthError::Rejected(msg) => AppError::Auth(msg),
            AuthError::RegistrationFailed(_) => AppError::ExternalService(err.to_string()),
            AuthError::Store(err) => AppError::from(err),
        }
    }
}
