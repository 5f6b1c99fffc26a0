//! In-memory user registry with a single-identity session.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (store, credential matching,
//!   session transitions, filtering, route guarding). No I/O.
//! - **[`io`]**: Side-effecting helpers (config file, action scripts).
//!
//! [`app`] owns the state and turns discrete [`app::Action`] values into
//! outcomes; [`forms`] validates raw form input before it reaches the core;
//! [`replay`] drives the `roster run` command.

pub mod app;
pub mod core;
pub mod exit_codes;
pub mod forms;
pub mod io;
pub mod logging;
pub mod replay;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
