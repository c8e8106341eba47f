//! Permission gate for the folio client shell.
//!
//! Restricted sections (combined portfolio, notifications) are guarded
//! by plan entitlements. This crate decides, per transition, whether the
//! current user may enter a section, and surfaces a blocking restriction
//! dialog when they may not.
//!
//! # Design
//!
//! - Entitlements are read through [`EntitlementProvider`] as a fresh
//!   call-by-value snapshot on every check; nothing is cached across
//!   transitions.
//! - The dialog wait is cooperative suspension of the calling guard
//!   only; independent work keeps running.
//! - The gate is idempotent per call, not per transition: callers must
//!   invoke it at most once per transition or the user sees duplicate
//!   dialogs.
//!
//! # Contents
//!
//! - [`PermissionGate`]: the check itself
//! - [`Decision`]: granted / denied-with-reason result
//! - [`EntitlementProvider`], [`Entitlements`]: plan snapshot contract
//! - [`DialogService`], [`DialogDescriptor`], [`DialogOutcome`]: the
//!   blocking dialog contract (also used by leaving guards for
//!   confirmation prompts)
//! - [`testing`]: scriptable doubles for tests

mod decision;
mod dialog;
mod entitlements;
mod gate;

pub mod testing;

pub use decision::Decision;
pub use dialog::{DialogDescriptor, DialogOutcome, DialogService};
pub use entitlements::{EntitlementProvider, Entitlements};
pub use gate::PermissionGate;
