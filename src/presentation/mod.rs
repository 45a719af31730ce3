//! Presentation Module
//!
//! Server-side HTML rendering of the roster page. The single entry point,
//! `page::render`, takes the roster, the status message, the computed result and the
//! section to show. It has no knowledge of how those were produced.

pub mod page;

pub use page::render;
