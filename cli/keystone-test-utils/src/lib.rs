//! Shared test helpers for the keystone crates.
//!
//! - [`fixtures`]: canned v2 and v3 authentication responses
//! - [`proptest`]: strategies generating catalog payloads
//! - [`logging`]: a `tracing` subscriber that captures output for assertions

pub mod fixtures;
pub mod logging;
pub mod proptest;
