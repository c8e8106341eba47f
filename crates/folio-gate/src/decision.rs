//! Permission decision value.

use folio_types::ForbiddenCode;
use serde::{Deserialize, Serialize};

/// Outcome of one entitlement check.
///
/// Computed per transition and never cached: entitlements can change
/// between navigations, so yesterday's grant proves nothing.
///
/// # Example
///
/// ```
/// use folio_gate::Decision;
/// use folio_types::ForbiddenCode;
///
/// let ok = Decision::granted();
/// assert!(ok.is_granted());
/// assert!(ok.reason.is_none());
///
/// let no = Decision::denied(ForbiddenCode::PermissionDenied);
/// assert!(!no.is_granted());
/// assert_eq!(no.reason, Some(ForbiddenCode::PermissionDenied));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the section may be entered.
    pub granted: bool,
    /// Refusal reason when not granted.
    pub reason: Option<ForbiddenCode>,
}

impl Decision {
    /// Creates a granting decision.
    #[must_use]
    pub fn granted() -> Self {
        Self {
            granted: true,
            reason: None,
        }
    }

    /// Creates a denying decision with the given reason.
    #[must_use]
    pub fn denied(reason: ForbiddenCode) -> Self {
        Self {
            granted: false,
            reason: Some(reason),
        }
    }

    /// Returns `true` when the section may be entered.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_has_no_reason() {
        let d = Decision::granted();
        assert!(d.is_granted());
        assert!(d.reason.is_none());
    }

    #[test]
    fn denied_carries_reason() {
        let d = Decision::denied(ForbiddenCode::TariffExpired);
        assert!(!d.is_granted());
        assert_eq!(d.reason, Some(ForbiddenCode::TariffExpired));
    }
}
