//! procview core library.
//!
//! A point-in-time inspector for the in-process registry of execution
//! units: shell command processes addressed by 1-based slots, and
//! scheduler tasks held in ordered ready/waiting sequences. One
//! invocation takes one guarded snapshot and renders it in one of
//! several column-aligned views, including a glob search over command
//! names.
//!
//! - Registry enumeration runs under a scoped guard; nothing mutates the
//!   tables while a walk reads them, and the guard is never held across
//!   output I/O.
//! - Command names live in a length-prefixed raw form; `bstr` is the
//!   only decoder.
//! - The binary entry point is in `main.rs`.

pub mod bstr;
pub mod exit_codes;
pub mod guard;
pub mod inspect;
pub mod logging;
pub mod pattern;
pub mod registry;
pub mod render;
pub mod snapshot;
pub mod view;

// Re-export registry builders for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock_registry;
