//! Shared CLI utility functions used across command handlers.

use colored::*;
use core::error::Error;
use std::fs;
use std::path::Path;

use tagcheck_lib::config as tagcheck_config;
use tagcheck_lib::exit_codes::exit;

use crate::CheckArgs;

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Apply CLI argument overrides to a loaded config.
pub fn apply_cli_overrides(config: &mut tagcheck_config::Config, args: &CheckArgs) {
    if let Some(format) = args.output_format {
        config.global.output_format = format.into();
    }

    if let Some(fail_on) = args.fail_on {
        config.global.fail_on = fail_on.into();
    }

    // --disable is additive with the config file list
    if let Some(ref disable) = args.disable {
        for rule in split_list(disable) {
            if !config.global.disable.iter().any(|r| r.eq_ignore_ascii_case(&rule)) {
                config.global.disable.push(rule);
            }
        }
    }

    // --extensions replaces the configured list
    if let Some(ref extensions) = args.extensions {
        config.global.extensions = split_list(extensions)
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
    }
}

/// Read file content as a UTF-8 string.
pub fn read_file_efficiently(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path.display(), e).into())
}

/// Load configuration with standard CLI error handling, optionally using a discovery directory.
pub fn load_config_with_cli_error_handling_with_dir(
    config_path: Option<&str>,
    isolated: bool,
    discovery_dir: Option<&Path>,
) -> tagcheck_config::Config {
    match tagcheck_config::load_with_discovery(config_path, discovery_dir, isolated) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}
