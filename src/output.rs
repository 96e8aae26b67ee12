//! Rendering of diagnostics for the terminal and for machines.
//!
//! The legacy format keeps the classic checker wording byte for byte;
//! the other formats carry file, line and rule code information.

use colored::*;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::utils::LineIndex;
use crate::utils::quoting::quote_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `Mismatched closing tag: </b> at index 6` style lines
    #[default]
    Legacy,
    /// `file:line:col: [CODE] message` with colour
    Text,
    /// `file:line:col: CODE message` without colour
    Concise,
    /// One JSON array of all diagnostics across files
    Json,
}

impl OutputFormat {
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Legacy => Box::new(LegacyFormatter),
            Self::Text => Box::new(TextFormatter),
            Self::Concise => Box::new(ConciseFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }

    /// Whether a summary line follows the diagnostics.
    pub fn has_summary(&self) -> bool {
        matches!(self, Self::Text | Self::Concise)
    }
}

/// A diagnostic with its 1-based line and column resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedDiagnostic {
    pub diagnostic: Diagnostic,
    pub line: usize,
    pub column: usize,
}

impl LocatedDiagnostic {
    pub fn locate(diagnostics: Vec<Diagnostic>, content: &str) -> Vec<Self> {
        let index = LineIndex::new(content);
        diagnostics
            .into_iter()
            .map(|diagnostic| {
                let (line, column) = index.line_col(diagnostic.offset);
                Self {
                    diagnostic,
                    line,
                    column,
                }
            })
            .collect()
    }
}

/// All diagnostics for one checked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub path: String,
    pub diagnostics: Vec<LocatedDiagnostic>,
}

impl FileResult {
    pub fn has_severity_at_least(&self, severity: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.diagnostic.severity >= severity)
    }
}

pub trait OutputFormatter {
    /// Text for one file, one line per entry with trailing newlines. Empty for clean files.
    fn format_file(&self, result: &FileResult, show_header: bool) -> String;

    /// Text emitted once after all files have been processed.
    fn format_batch(&self, _results: &[FileResult]) -> String {
        String::new()
    }
}

pub struct LegacyFormatter;

impl LegacyFormatter {
    fn lines(diagnostic: &Diagnostic) -> Vec<String> {
        let index = diagnostic.index;
        match &diagnostic.kind {
            DiagnosticKind::MismatchedClosingTag { name, last_opened } => {
                let mut lines = vec![format!("Mismatched closing tag: </{name}> at index {index}")];
                if let Some(top) = last_opened {
                    lines.push(format!("Last opened was: <{top}>"));
                }
                lines
            }
            DiagnosticKind::UnclosedTags { names } => vec![format!("Unclosed tags: {}", quote_list(names))],
            DiagnosticKind::UnterminatedClosingTag { name } => {
                vec![format!("Unterminated closing tag: </{name}> at index {index}")]
            }
            DiagnosticKind::UnterminatedComment => vec![format!("Unterminated comment at index {index}")],
        }
    }
}

impl OutputFormatter for LegacyFormatter {
    fn format_file(&self, result: &FileResult, show_header: bool) -> String {
        if result.diagnostics.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        if show_header {
            out.push_str(&format!("==> {} <==\n", result.path));
        }
        for located in &result.diagnostics {
            for line in Self::lines(&located.diagnostic) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

pub struct TextFormatter;

fn severity_color(code: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => code.red().bold(),
        Severity::Warning => code.yellow().bold(),
        Severity::Info => code.blue().bold(),
    }
}

impl OutputFormatter for TextFormatter {
    fn format_file(&self, result: &FileResult, _show_header: bool) -> String {
        let mut out = String::new();
        for located in &result.diagnostics {
            let diag = &located.diagnostic;
            let code = format!("[{}]", diag.code());
            out.push_str(&format!(
                "{}:{}:{}: {} {}\n",
                result.path.blue().underline(),
                located.line.to_string().cyan(),
                located.column.to_string().cyan(),
                severity_color(&code, diag.severity),
                diag.message()
            ));
        }
        out
    }
}

pub struct ConciseFormatter;

impl OutputFormatter for ConciseFormatter {
    fn format_file(&self, result: &FileResult, _show_header: bool) -> String {
        let mut out = String::new();
        for located in &result.diagnostics {
            out.push_str(&format!(
                "{}:{}:{}: {} {}\n",
                result.path,
                located.line,
                located.column,
                located.diagnostic.code(),
                located.diagnostic.message()
            ));
        }
        out
    }
}

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    file: &'a str,
    code: &'static str,
    severity: Severity,
    line: usize,
    column: usize,
    index: usize,
    message: String,
    names: Vec<&'a str>,
}

impl JsonFormatter {
    fn entries(results: &[FileResult]) -> Vec<JsonDiagnostic<'_>> {
        results
            .iter()
            .flat_map(|result| {
                result.diagnostics.iter().map(move |located| {
                    let diag = &located.diagnostic;
                    JsonDiagnostic {
                        file: &result.path,
                        code: diag.code().as_str(),
                        severity: diag.severity,
                        line: located.line,
                        column: located.column,
                        index: diag.index,
                        message: diag.message(),
                        names: diag.kind.names(),
                    }
                })
            })
            .collect()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_file(&self, _result: &FileResult, _show_header: bool) -> String {
        String::new()
    }

    fn format_batch(&self, results: &[FileResult]) -> String {
        let entries = Self::entries(results);
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                log::error!("Failed to serialize diagnostics: {e}");
                "[]\n".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use pretty_assertions::assert_eq;

    fn result_for(path: &str, content: &str) -> FileResult {
        FileResult {
            path: path.to_string(),
            diagnostics: LocatedDiagnostic::locate(scan(content).diagnostics, content),
        }
    }

    #[test]
    fn test_legacy_reproduces_classic_wording() {
        let result = result_for("page.tsx", "<a><b></a></b>");
        let out = LegacyFormatter.format_file(&result, false);
        assert_eq!(
            out,
            "Mismatched closing tag: </a> at index 6\nLast opened was: <b>\nUnclosed tags: ['a']\n"
        );
    }

    #[test]
    fn test_legacy_mismatch_on_empty_stack_has_single_line() {
        let result = result_for("page.tsx", "</div>");
        assert_eq!(
            LegacyFormatter.format_file(&result, false),
            "Mismatched closing tag: </div> at index 0\n"
        );
    }

    #[test]
    fn test_legacy_header_only_when_requested() {
        let result = result_for("a.html", "<p>");
        assert_eq!(
            LegacyFormatter.format_file(&result, true),
            "==> a.html <==\nUnclosed tags: ['p']\n"
        );
        let clean = result_for("b.html", "<p></p>");
        assert_eq!(LegacyFormatter.format_file(&clean, true), "");
    }

    #[test]
    fn test_legacy_hardened_kinds() {
        let result = result_for("x.html", "<!-- open");
        assert_eq!(
            LegacyFormatter.format_file(&result, false),
            "Unterminated comment at index 0\n"
        );
        let result = result_for("x.html", "ab</span");
        assert_eq!(
            LegacyFormatter.format_file(&result, false),
            "Unterminated closing tag: </span> at index 2\n"
        );
    }

    #[test]
    fn test_concise_has_location_and_code() {
        let result = result_for("dir/page.html", "<div>\n  </span>\n</div>");
        assert_eq!(
            ConciseFormatter.format_file(&result, false),
            "dir/page.html:2:3: TAG001 Mismatched closing tag </span> (last opened was <div>)\n"
        );
    }

    #[test]
    fn test_text_contains_code_and_message() {
        colored::control::set_override(false);
        let result = result_for("page.html", "<ul>");
        let out = TextFormatter.format_file(&result, false);
        assert_eq!(out, "page.html:1:5: [TAG002] Unclosed tags: ul\n");
    }

    #[test]
    fn test_json_batch_is_valid_json() {
        let results = vec![result_for("a.html", "<a><b></a>"), result_for("b.html", "<p></p>")];
        let out = JsonFormatter.format_batch(&results);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["file"], "a.html");
        assert_eq!(entries[0]["code"], "TAG001");
        assert_eq!(entries[0]["severity"], "error");
        assert_eq!(entries[0]["index"], 6);
        assert_eq!(entries[1]["names"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_output_format_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"concise\"").unwrap();
        assert_eq!(parsed.format, OutputFormat::Concise);
    }
}
