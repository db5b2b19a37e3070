//! Unified error handling
//!
//! [`AppError`] covers the whole service-layer taxonomy:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | NotFound | entity lookup missed |
//! | Unauthorized | ownership/role check failed |
//! | InvalidOperation | illegal transition or business-rule violation |
//! | Validation | malformed input |
//! | External | a collaborator (channel, fee calc) failed |
//! | Internal | unexpected server-side failure |
//!
//! Business-rule violations surface to callers with a user-facing message;
//! notification-channel failures never reach this type - they are swallowed
//! and logged at the router boundary.

use crate::orders::state_machine::TransitionError;
use shared::fee::FeeError;
use tracing::error;

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Resource lookup missed (404-class)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Ownership or role check failed (403-class)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Illegal state transition or business-rule violation (422-class)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Malformed input (400-class)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An external collaborator failed (502-class)
    #[error("External dependency failed: {0}")]
    External(String),

    /// Unexpected internal failure (500-class)
    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        error!(error = %msg, "Internal error occurred");
        Self::Internal(msg)
    }

    /// Stable wire code for the error class
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidOperation(_) => "INVALID_OPERATION",
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::External(_) => "EXTERNAL_DEPENDENCY_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Fee failures during order creation abort the operation with the specific
/// reason (missing address, minimum not met, distance exceeded)
impl From<FeeError> for AppError {
    fn from(err: FeeError) -> Self {
        match err {
            FeeError::RestaurantLocationMissing | FeeError::CustomerAddressMissing => {
                AppError::Validation(err.to_string())
            }
            FeeError::MinimumOrderNotMet { .. } | FeeError::DeliveryDistanceExceeded { .. } => {
                AppError::InvalidOperation(err.to_string())
            }
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { .. } => AppError::InvalidOperation(err.to_string()),
            TransitionError::Unauthorized => AppError::Unauthorized(err.to_string()),
            TransitionError::MissingDeliveryPerson => AppError::Validation(err.to_string()),
        }
    }
}
