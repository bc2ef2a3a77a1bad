//! Structured logging for the Atelier storefront.
//!
//! This crate provides:
//! - `SessionTag` - Per-page correlation tag attached to every entry
//! - `StructuredLogger` - Structured logging with component context
//! - `LogBuilder` - Entries with typed key/value fields
//!
//! Native builds write entries to stderr. With the `web` feature on
//! `wasm32`, entries go to the browser console instead.

mod clock;
mod logging;
mod session;

pub use logging::*;
pub use session::SessionTag;
