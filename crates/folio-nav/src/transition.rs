//! Transition value object.
//!
//! One [`Transition`] describes one attempt to change the active page:
//! where from, where to, the ordered guard outcomes collected along the
//! way, and the terminal status. It is created when navigation is
//! requested, mutated only by the router while evaluating, and frozen
//! once a terminal status is reached.

use crate::{GuardPhase, NavError};
use folio_types::{Location, TransitionId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle status of a transition.
///
/// `Pending` is the only non-terminal status. `Proceeding` is the
/// *successful* terminal: all guards passed and the page swap ran to
/// completion (once the swap starts it cannot be cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStatus {
    /// Guard chain still evaluating.
    Pending,
    /// All guards passed; the swap ran to completion.
    Proceeding,
    /// A guard (or the user via a dialog) stopped the attempt.
    Cancelled,
    /// Superseded by a fresh attempt at another location.
    Redirected,
    /// A guard raised an unexpected error; the active page stayed.
    Failed,
}

impl TransitionStatus {
    /// Returns `true` for every status except [`Pending`](Self::Pending).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Collapsed guard outcome stored in the transition record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The guard let the chain continue (with or without callback).
    Continue,
    /// The guard cancelled the transition.
    Cancel,
    /// The guard redirected to another location.
    Redirect,
    /// The guard failed.
    Fail,
}

/// One guard's contribution to a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardRecord {
    /// Guard name (or `permission-gate` for the entitlement check).
    pub guard: String,
    /// Chain phase the guard ran in.
    pub phase: GuardPhase,
    /// What it decided.
    pub outcome: OutcomeKind,
}

/// One in-flight (then settled) navigation attempt.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Correlation id for logs.
    pub id: TransitionId,
    /// Location being left.
    pub from: Location,
    /// Target location (normalized once the route table resolved it).
    pub to: Location,
    status: TransitionStatus,
    records: Vec<GuardRecord>,
    error: Option<NavError>,
}

impl Transition {
    pub(crate) fn new(from: Location, to: Location) -> Self {
        Self {
            id: TransitionId::new(),
            from,
            to,
            status: TransitionStatus::Pending,
            records: Vec::new(),
            error: None,
        }
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Returns the guard outcomes in execution order.
    #[must_use]
    pub fn records(&self) -> &[GuardRecord] {
        &self.records
    }

    /// Returns the error of a failed transition.
    #[must_use]
    pub fn error(&self) -> Option<&NavError> {
        self.error.as_ref()
    }

    /// Returns `true` if the swap completed successfully.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.status == TransitionStatus::Proceeding
    }

    /// Returns `true` if a guard or the user stopped the attempt.
    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.status == TransitionStatus::Cancelled
    }

    /// Returns `true` if the attempt terminated with an error.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == TransitionStatus::Failed
    }

    pub(crate) fn record(
        &mut self,
        guard: impl Into<String>,
        phase: GuardPhase,
        outcome: OutcomeKind,
    ) {
        self.records.push(GuardRecord {
            guard: guard.into(),
            phase,
            outcome,
        });
    }

    /// Settles the transition. A settled transition never changes
    /// again; a second resolution attempt is a router bug.
    pub(crate) fn resolve(&mut self, status: TransitionStatus) {
        debug_assert!(
            !self.status.is_terminal(),
            "transition {} resolved twice ({:?} then {:?})",
            self.id,
            self.status,
            status
        );
        if self.status.is_terminal() {
            return;
        }
        debug!(id = %self.id, ?status, "transition settled");
        self.status = status;
    }

    /// Settles the transition as failed, keeping the error.
    pub(crate) fn fail(&mut self, error: NavError) {
        self.error = Some(error);
        self.resolve(TransitionStatus::Failed);
    }
}
