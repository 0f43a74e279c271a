//! CLI command implementations
//!
//! Each command returns the process exit code: 0 on success, 1 on any failure.

pub mod export;
pub mod validate;

/// Exit code for a clean run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any failure
pub const EXIT_FAILURE: i32 = 1;
