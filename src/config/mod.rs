//! Configuration loaded from `.tagcheck.toml`.

mod discovery;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use discovery::{discover_config_file, load_with_discovery};
pub use types::*;
pub use validation::{ConfigValidationWarning, suggest_similar_key, validate_cli_rule_names, validate_config};
