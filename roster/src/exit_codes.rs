//! Stable exit codes for roster CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to an invalid script, config, or other errors.
pub const INVALID: i32 = 1;
