//! Tag balance checking for HTML, JSX/TSX and other markup templates.
//!
//! The core is [`scanner::scan`], a single pass that tracks open tags on a
//! stack and reports mismatched closing tags and tags left open. The rest of
//! the crate turns those records into configured, located and rendered output.

pub mod config;
pub mod diagnostic;
pub mod exit_codes;
pub mod output;
pub mod scanner;
pub mod utils;

pub use diagnostic::{Diagnostic, DiagnosticKind, RuleCode, Severity};
pub use output::{FileResult, LocatedDiagnostic, OutputFormat};
pub use scanner::{ScanOutcome, scan};

/// Scan `content` and apply the rule configuration (disabled rules, severity overrides).
pub fn check(content: &str, config: &config::Config) -> Vec<Diagnostic> {
    let outcome = scan(content);
    log::debug!(
        "Scan found {} diagnostic(s), {} tag(s) left open",
        outcome.diagnostics.len(),
        outcome.open_tags.len()
    );
    config.apply_rules(outcome.diagnostics)
}

/// Check one file's content and resolve line/column positions for display as `path`.
pub fn check_file_content(path: &str, content: &str, config: &config::Config) -> FileResult {
    let diagnostics = check(content, config);
    FileResult {
        path: path.to_string(),
        diagnostics: LocatedDiagnostic::locate(diagnostics, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_applies_config() {
        let config = config::Config::from_toml_str("[global]\ndisable = [\"TAG002\"]\n").unwrap();
        assert!(check("<div>", &config).is_empty());
        assert_eq!(check("<div>", &config::Config::default()).len(), 1);
    }

    #[test]
    fn test_check_file_content_locates_diagnostics() {
        let result = check_file_content("x.html", "<ul>\n  <li>\n</ul>", &config::Config::default());
        assert_eq!(result.path, "x.html");
        let first = &result.diagnostics[0];
        assert_eq!((first.line, first.column), (3, 1));
        assert_eq!(first.diagnostic.code(), RuleCode::MismatchedClosingTag);
    }
}
