//! Deterministic, pure logic of the user registry.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests. The
//! current date is passed in by the caller rather than read here.

pub mod credentials;
pub mod filter;
pub mod route;
pub mod session;
pub mod store;
pub mod types;
