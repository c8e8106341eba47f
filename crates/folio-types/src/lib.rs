//! Core types for the folio client shell.
//!
//! This crate is the leaf of the workspace: value objects and small
//! contracts shared by every other folio crate, with no dependency on
//! the event bus, the permission gate or the router.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  folio-types   : Location, ids, Permission  ◄── HERE │
//! │  folio-event   : EventKey, EventBus                  │
//! │  folio-gate    : Entitlements, PermissionGate        │
//! ├──────────────────────────────────────────────────────┤
//! │  folio-nav     : Guard chain, Transition, Router     │
//! ├──────────────────────────────────────────────────────┤
//! │  folio-app     : pages, services, route table        │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Contents
//!
//! - [`Location`]: target address of a navigation attempt
//! - [`PageInstanceId`], [`TransitionId`], [`SubscriptionId`]: UUID
//!   newtypes for ownership and correlation
//! - [`Permission`], [`ForbiddenCode`]: plan entitlements and refusal
//!   reasons
//! - [`ErrorCode`]: unified machine-readable error interface, with
//!   [`assert_error_code`]/[`assert_error_codes`] test helpers

mod error;
mod id;
mod location;
mod permission;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{PageInstanceId, SubscriptionId, TransitionId};
pub use location::Location;
pub use permission::{ForbiddenCode, Permission};
