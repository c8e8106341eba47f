//! Trades page.
//!
//! Lists trades and hosts the add-trade form. While a draft trade is
//! open, leaving the page asks for confirmation through the blocking
//! dialog; declining keeps the user (and the draft) in place.

use folio_event::EventKey;
use folio_gate::{DialogDescriptor, DialogService};
use folio_nav::{Disposition, EventBinding, LeavingGuard, Page};
use folio_types::{Location, PageInstanceId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The trades page.
pub struct TradesPage {
    id: PageInstanceId,
    draft_open: AtomicBool,
    stale: Arc<AtomicBool>,
    dialogs: Arc<dyn DialogService>,
}

impl TradesPage {
    /// Creates the page.
    #[must_use]
    pub fn new(dialogs: Arc<dyn DialogService>) -> Self {
        Self {
            id: PageInstanceId::new(),
            draft_open: AtomicBool::new(false),
            stale: Arc::new(AtomicBool::new(false)),
            dialogs,
        }
    }

    /// Opens a draft trade (form with unsaved input).
    pub fn begin_draft(&self) {
        self.draft_open.store(true, Ordering::SeqCst);
    }

    /// Discards the draft (form saved or reset).
    pub fn discard_draft(&self) {
        self.draft_open.store(false, Ordering::SeqCst);
    }

    /// Returns `true` while unsaved input exists.
    #[must_use]
    pub fn has_draft(&self) -> bool {
        self.draft_open.load(Ordering::SeqCst)
    }

    /// Returns `true` when published events invalidated the list.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LeavingGuard for TradesPage {
    async fn before_leave(&self, _to: &Location, _from: &Location) -> Disposition {
        if !self.has_draft() {
            return Disposition::Continue;
        }

        let outcome = self
            .dialogs
            .show(DialogDescriptor::confirm("Discard the unsaved trade?"))
            .await;
        if outcome.is_confirmed() {
            self.discard_draft();
            Disposition::Continue
        } else {
            Disposition::Cancel
        }
    }
}

impl Page for TradesPage {
    fn id(&self) -> PageInstanceId {
        self.id
    }

    fn route_name(&self) -> &str {
        "trades"
    }

    fn subscriptions(&self) -> Vec<EventBinding> {
        let on_created = Arc::clone(&self.stale);
        let on_updated = Arc::clone(&self.stale);
        vec![
            EventBinding::new(EventKey::TradeCreated, move |_payload| {
                on_created.store(true, Ordering::SeqCst);
                Ok(())
            }),
            EventBinding::new(EventKey::TradeUpdated, move |_payload| {
                on_updated.store(true, Ordering::SeqCst);
                Ok(())
            }),
        ]
    }

    fn as_leaving_guard(&self) -> Option<&dyn LeavingGuard> {
        Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_gate::testing::BlockingDialogStub;
    use folio_gate::DialogOutcome;

    #[tokio::test]
    async fn leaving_without_draft_is_silent() {
        let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));
        let page = TradesPage::new(Arc::clone(&dialogs) as _);

        let d = page
            .before_leave(&Location::path("/portfolio"), &Location::path("/trades"))
            .await;

        assert!(matches!(d, Disposition::Continue));
        assert_eq!(dialogs.shown(), 0);
    }

    #[tokio::test]
    async fn declined_confirmation_cancels_departure() {
        let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Declined));
        let page = TradesPage::new(Arc::clone(&dialogs) as _);
        page.begin_draft();

        let d = page
            .before_leave(&Location::path("/portfolio"), &Location::path("/trades"))
            .await;

        assert!(matches!(d, Disposition::Cancel));
        assert_eq!(dialogs.shown(), 1);
        assert!(page.has_draft());
    }

    #[tokio::test]
    async fn confirmed_departure_discards_the_draft() {
        let dialogs = Arc::new(BlockingDialogStub::resolving(DialogOutcome::Confirmed));
        let page = TradesPage::new(Arc::clone(&dialogs) as _);
        page.begin_draft();

        let d = page
            .before_leave(&Location::path("/portfolio"), &Location::path("/trades"))
            .await;

        assert!(matches!(d, Disposition::Continue));
        assert!(!page.has_draft());
    }
}
