//! Unified error interface for the folio workspace.
//!
//! Every fallible layer (event bus, permission gate, router, services)
//! defines its own `thiserror` enum and implements [`ErrorCode`] on it,
//! so callers can branch on a stable machine-readable code and decide
//! whether a retry makes sense without matching concrete variants.
//!
//! # Code Convention
//!
//! | Layer | Prefix | Example |
//! |-------|--------|---------|
//! | Event bus | `EVENT_` | `EVENT_HANDLER_FAILED` |
//! | Router | `NAV_` | `NAV_REDIRECT_LOOP` |
//! | Services | `SVC_` | `SVC_UNAVAILABLE` |
//!
//! Codes are UPPER_SNAKE_CASE and stable once published; renaming one is
//! a breaking change.

/// Machine-readable error code interface.
///
/// # Recoverability
///
/// An error is recoverable when retrying the same operation may succeed
/// (transient remote failure, busy resource) or when the user can fix it
/// by acting (upgrading a plan). It is not recoverable when the input or
/// configuration is wrong and will stay wrong on retry.
///
/// # Example
///
/// ```
/// use folio_types::ErrorCode;
///
/// #[derive(Debug)]
/// enum LoadError {
///     Unavailable,
///     BadAddress,
/// }
///
/// impl ErrorCode for LoadError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Unavailable => "SVC_UNAVAILABLE",
///             Self::BadAddress => "SVC_BAD_ADDRESS",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Unavailable)
///     }
/// }
///
/// assert_eq!(LoadError::Unavailable.code(), "SVC_UNAVAILABLE");
/// assert!(LoadError::Unavailable.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns the stable UPPER_SNAKE_CASE code for this error.
    fn code(&self) -> &'static str;

    /// Returns whether retrying (or user action) can clear the error.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows workspace conventions.
///
/// Checks that the code is non-empty, UPPER_SNAKE_CASE, and starts with
/// the expected layer prefix. Intended for use in each error enum's test
/// module.
///
/// # Panics
///
/// Panics with a descriptive message when a check fails.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Asserts conventions for every variant of an error enum at once.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
