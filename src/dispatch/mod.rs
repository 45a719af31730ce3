//! Command Dispatcher Module
//!
//! Bridges the HTTP surface and the record store.
//!
//! ## Flow
//! 1. **Decode**: `action` turns the submitted form into a typed `Action`, rejecting
//!    missing fields and unparseable numbers up front.
//! 2. **Execute**: `service::RosterService` answers queries under a read lock and
//!    applies each `Mutation` under the write lock, persisting it before it becomes
//!    visible.
//! 3. **Respond**: `handlers` render the page for the resulting `Outcome`.

pub mod action;
pub mod handlers;
pub mod service;
pub mod types;

pub use action::{Action, ActionForm, Mutation};
pub use service::RosterService;
pub use types::{Outcome, Section};
