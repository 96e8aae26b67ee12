use super::*;
use crate::diagnostic::{Diagnostic, DiagnosticKind, RuleCode, Severity};
use crate::output::OutputFormat;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_defaults_when_section_missing() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.global.output_format, OutputFormat::Legacy);
    assert_eq!(config.global.fail_on, FailOn::Never);
    assert!(config.global.disable.is_empty());
    assert!(config.global.respect_gitignore);
    assert!(config.global.extensions.iter().any(|e| e == "tsx"));
}

#[test]
fn test_global_and_rule_sections_load() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    let config_content = r#"
[global]
output-format = "concise"
fail-on = "error"
disable = ["TAG004"]
extensions = ["html"]

[TAG002]
severity = "warning"
"#;
    fs::write(&config_path, config_content).unwrap();

    let config = Config::load(&config_path).unwrap();
    assert_eq!(config.global.output_format, OutputFormat::Concise);
    assert_eq!(config.global.fail_on, FailOn::Error);
    assert!(config.is_rule_disabled(RuleCode::UnterminatedComment));
    assert!(!config.is_rule_disabled(RuleCode::UnclosedTags));
    assert_eq!(config.rule_severity(RuleCode::UnclosedTags), Severity::Warning);
    assert_eq!(config.rule_severity(RuleCode::MismatchedClosingTag), Severity::Error);
    assert_eq!(config.source_path.as_deref(), Some(config_path.as_path()));
}

#[test]
fn test_snake_case_aliases_accepted() {
    let config = Config::from_toml_str("[global]\noutput_format = \"json\"\nrespect_gitignore = false\n").unwrap();
    assert_eq!(config.global.output_format, OutputFormat::Json);
    assert!(!config.global.respect_gitignore);
}

#[test]
fn test_unknown_global_key_is_rejected() {
    let err = Config::from_toml_str("[global]\nline-length = 80\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn test_unknown_rule_option_is_rejected() {
    assert!(Config::from_toml_str("[TAG001]\nstyle = \"strict\"\n").is_err());
}

#[test]
fn test_apply_rules_filters_and_overrides() {
    let config = Config::from_toml_str("[global]\ndisable = [\"tag001\"]\n\n[TAG002]\nseverity = \"info\"\n").unwrap();
    let diagnostics = vec![
        Diagnostic::new(
            DiagnosticKind::MismatchedClosingTag {
                name: "a".into(),
                last_opened: None,
            },
            0,
            0,
        ),
        Diagnostic::new(DiagnosticKind::UnclosedTags { names: vec!["b".into()] }, 4, 4),
    ];

    let applied = config.apply_rules(diagnostics);
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].code(), RuleCode::UnclosedTags);
    assert_eq!(applied[0].severity, Severity::Info);
}

#[test]
fn test_matches_extension() {
    let config = Config::default();
    assert!(config.matches_extension(Path::new("pages/+Page.tsx")));
    assert!(config.matches_extension(Path::new("INDEX.HTML")));
    assert!(!config.matches_extension(Path::new("README.md")));
    assert!(!config.matches_extension(Path::new("Makefile")));
}

#[test]
fn test_fail_on_threshold() {
    assert_eq!(FailOn::Never.threshold(), None);
    assert_eq!(FailOn::Any.threshold(), Some(Severity::Info));
    assert_eq!(FailOn::Error.threshold(), Some(Severity::Error));
}

#[test]
fn test_discovery_walks_up_to_repository_root() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join(CONFIG_FILE_NAME), "[global]\nfail-on = \"any\"\n").unwrap();
    let nested = root.join("src").join("pages");
    fs::create_dir_all(&nested).unwrap();

    let found = discover_config_file(&nested).unwrap();
    assert_eq!(found, root.join(CONFIG_FILE_NAME));

    let config = load_with_discovery(None, Some(&nested), false).unwrap();
    assert_eq!(config.global.fail_on, FailOn::Any);
}

#[test]
fn test_discovery_stops_at_git_directory() {
    let temp_dir = tempdir().unwrap();
    let outer = temp_dir.path();
    fs::write(outer.join(CONFIG_FILE_NAME), "[global]\nfail-on = \"any\"\n").unwrap();
    let repo = outer.join("repo");
    fs::create_dir_all(repo.join(".git")).unwrap();

    assert!(discover_config_file(&repo).is_none());
}

#[test]
fn test_isolated_ignores_discovered_config() {
    let temp_dir = tempdir().unwrap();
    fs::create_dir(temp_dir.path().join(".git")).unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "[global]\nfail-on = \"any\"\n").unwrap();

    let config = load_with_discovery(None, Some(temp_dir.path()), true).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let err = load_with_discovery(Some(missing.to_str().unwrap()), None, false).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn test_create_default_config_round_trips() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    create_default_config(path.to_str().unwrap()).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.global, GlobalConfig::default());
    assert!(config.rules.is_empty());

    let err = create_default_config(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Configuration file already exists"));
}

#[test]
fn test_validate_config_suggests_codes() {
    let config = Config::from_toml_str("[global]\ndisable = [\"TAG01\"]\n\n[TAG009]\nseverity = \"info\"\n").unwrap();
    let warnings = validate_config(&config);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].message.contains("did you mean: TAG001?"));
    assert_eq!(warnings[1].rule.as_deref(), Some("TAG009"));
}

#[test]
fn test_validate_cli_rule_names() {
    assert!(validate_cli_rule_names(None).is_empty());
    assert!(validate_cli_rule_names(Some("TAG001, tag002")).is_empty());
    let warnings = validate_cli_rule_names(Some("TAG001,bogus"));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.starts_with("Unknown rule in --disable: bogus"));
}
