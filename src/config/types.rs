use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::diagnostic::{Diagnostic, RuleCode, Severity};
use crate::output::OutputFormat;

/// Name of the configuration file looked up during discovery.
pub const CONFIG_FILE_NAME: &str = ".tagcheck.toml";

/// Extensions checked when a directory is given on the command line.
pub const DEFAULT_EXTENSIONS: &[&str] = &["html", "htm", "xhtml", "xml", "svg", "jsx", "tsx", "vue", "svelte", "astro"];

/// Represents a rule-specific configuration section such as `[TAG002]`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Severity override for this rule (error, warning, or info)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// Which severities make the process exit with the violations status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Exit 1 on any diagnostic
    Any,
    /// Exit 1 on warning or error diagnostics
    Warning,
    /// Exit 1 only on error diagnostics
    Error,
    /// Always exit 0
    #[default]
    Never,
}

impl FailOn {
    /// Minimum severity that triggers a failing exit status, if any.
    pub fn threshold(&self) -> Option<Severity> {
        match self {
            Self::Any => Some(Severity::Info),
            Self::Warning => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
            Self::Never => None,
        }
    }
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Output format for diagnostics
    #[serde(alias = "output_format")]
    pub output_format: OutputFormat,

    /// Severity threshold for a failing exit status
    #[serde(alias = "fail_on")]
    pub fail_on: FailOn,

    /// Rule codes to disable
    pub disable: Vec<String>,

    /// File extensions checked when walking directories
    pub extensions: Vec<String>,

    /// Respect .gitignore files when walking directories
    #[serde(alias = "respect_gitignore")]
    pub respect_gitignore: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            fail_on: FailOn::default(),
            disable: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

/// Represents the complete configuration loaded from `.tagcheck.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Rule-specific configurations keyed by rule code (e.g. `TAG001`)
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,

    /// File this configuration was loaded from, if any
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError(msg) => ConfigError::ParseError(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn is_rule_disabled(&self, code: RuleCode) -> bool {
        self.global
            .disable
            .iter()
            .any(|name| name.trim().eq_ignore_ascii_case(code.as_str()))
    }

    /// Effective severity for a rule: the configured override or the rule's default.
    pub fn rule_severity(&self, code: RuleCode) -> Severity {
        self.rules
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(code.as_str()))
            .and_then(|(_, rule)| rule.severity)
            .unwrap_or_else(|| code.default_severity())
    }

    /// Drop diagnostics of disabled rules and apply severity overrides.
    pub fn apply_rules(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|d| !self.is_rule_disabled(d.code()))
            .map(|mut d| {
                d.severity = self.rule_severity(d.code());
                d
            })
            .collect()
    }

    /// Whether `path` has one of the configured extensions (case-insensitive).
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.global
            .extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    fs::write(path, generate_default_config()).map_err(|source| ConfigError::IoError {
        source,
        path: path.to_string(),
    })
}

fn generate_default_config() -> String {
    let extensions = DEFAULT_EXTENSIONS
        .iter()
        .map(|ext| format!("\"{ext}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::from(
        r#"# tagcheck configuration file

[global]
# Output format: "legacy", "text", "concise" or "json"
output-format = "legacy"

# Exit with status 1 on: "any", "warning", "error" or "never"
fail-on = "never"

# Rule codes to disable, e.g. ["TAG003"]
disable = []

# Respect .gitignore files when walking directories
respect-gitignore = true

"#,
    );
    out.push_str("# Extensions checked when a directory is given\n");
    out.push_str(&format!("extensions = [{extensions}]\n"));

    for code in RuleCode::ALL {
        out.push_str(&format!(
            "\n# {}\n# [{}]\n# severity = \"{}\"\n",
            code.description(),
            code.as_str(),
            code.default_severity()
        ));
    }
    out
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },

    /// Explicitly requested configuration file does not exist
    #[error("Config file not found: {path}")]
    NotFound { path: String },
}
