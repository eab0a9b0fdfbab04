use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum WaitlistError {
    #[error("Waitlist request {0} not found")]
    RequestNotFound(i64),

    #[error("{0}")]
    ResourceNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<WaitlistError> for AppError {
    fn from(err: WaitlistError) -> Self {
        match err {
            WaitlistError::RequestNotFound(_) | WaitlistError::ResourceNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            WaitlistError::InvalidStatusTransition { .. } => AppError::Conflict(err.to_string()),
            WaitlistError::ValidationError(msg) => AppError::ValidationError(msg),
            WaitlistError::Store(err) => AppError::from(err),
        }
    }
}
