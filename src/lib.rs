//! Student Roster Service Library
//!
//! Core modules of the roster web application. The binary (`main.rs`) wires them
//! into an Axum server.
//!
//! ## Architecture Modules
//! - **`roster`**: The record store. An insertion-ordered in-memory roster of students
//!   and grades, loaded from and rewritten to two pipe-delimited files.
//! - **`dispatch`**: The command dispatcher. Decodes form submissions into typed
//!   actions, runs them against the roster under a single-writer lock, and exposes the
//!   HTTP handlers.
//! - **`presentation`**: Server-side HTML rendering of the roster page.
//! - **`config`**: Bind address and data directory resolution.
//! - **`error`**: Storage errors and user-facing action rejections.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod presentation;
pub mod roster;
