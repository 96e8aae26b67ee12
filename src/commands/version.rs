//! Handler for the `version` command.

/// Print the tool name and version.
pub fn handle_version() {
    println!("tagcheck {}", env!("CARGO_PKG_VERSION"));
}
