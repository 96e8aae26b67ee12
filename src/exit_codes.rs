//! Process exit statuses.

/// Clean run, or violations with `fail-on = never`.
pub const SUCCESS: i32 = 0;
/// Diagnostics at or above the `fail-on` threshold were found.
pub const VIOLATIONS_FOUND: i32 = 1;
/// Configuration error, unreadable input, or bad invocation.
pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::*;

    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND);
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
