//! Remote service errors.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`ServiceError::Unavailable`] | `SVC_UNAVAILABLE` | Yes |
//! | [`ServiceError::NotFound`] | `SVC_NOT_FOUND` | No |
//! | [`ServiceError::Malformed`] | `SVC_MALFORMED` | No |

use folio_types::ErrorCode;
use thiserror::Error;

/// Error from an HTTP-shaped data service.
///
/// Guards that preload page data propagate these into a failed
/// disposition; the router then keeps the user on the current page.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The backend did not answer (network failure, 5xx).
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend answered with something undecodable.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ErrorCode for ServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "SVC_UNAVAILABLE",
            Self::NotFound(_) => "SVC_NOT_FOUND",
            Self::Malformed(_) => "SVC_MALFORMED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::NotFound(_) => false,
            Self::Malformed(_) => false,
        }
    }
}
