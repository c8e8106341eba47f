//! Event layer errors.
//!
//! A handler failure never aborts a dispatch: the bus reports it and
//! keeps invoking the remaining subscribers, and the publisher is never
//! affected. [`EventError`] is the shape of that report.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`EventError::HandlerFailed`] | `EVENT_HANDLER_FAILED` | Yes |

use crate::EventKey;
use folio_types::{ErrorCode, SubscriptionId};
use thiserror::Error;

/// Event layer error.
///
/// # Example
///
/// ```
/// use folio_event::{EventError, EventKey};
/// use folio_types::{ErrorCode, SubscriptionId};
///
/// let err = EventError::HandlerFailed {
///     key: EventKey::TradeCreated,
///     subscription: SubscriptionId::new(),
///     message: "reload request rejected".into(),
/// };
///
/// assert_eq!(err.code(), "EVENT_HANDLER_FAILED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, Error)]
pub enum EventError {
    /// A subscriber's handler returned an error during dispatch.
    ///
    /// Dispatch to the remaining subscribers continued; this is a
    /// report, not an abort. Recoverable because the underlying cause
    /// is usually a transient data reload triggered by the handler.
    #[error("handler {subscription} for {key} failed: {message}")]
    HandlerFailed {
        /// The key being dispatched.
        key: EventKey,
        /// The failing subscription.
        subscription: SubscriptionId,
        /// The handler's own error message.
        message: String,
    },
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::HandlerFailed { .. } => "EVENT_HANDLER_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::HandlerFailed { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::assert_error_codes;

    fn all_variants() -> Vec<EventError> {
        vec![EventError::HandlerFailed {
            key: EventKey::AssetCreated,
            subscription: SubscriptionId::new(),
            message: "x".into(),
        }]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "EVENT_");
    }

    #[test]
    fn handler_failed_display() {
        let err = EventError::HandlerFailed {
            key: EventKey::TradeCreated,
            subscription: SubscriptionId::new(),
            message: "boom".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TRADE_CREATED"), "got: {msg}");
        assert!(msg.contains("boom"), "got: {msg}");
    }
}
