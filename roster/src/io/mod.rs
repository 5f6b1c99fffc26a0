//! I/O helpers for roster commands.

pub mod config;
pub mod script;
