//! Structured diagnostic records produced by the tag scanner.
//!
//! Rendering lives in [`crate::output`]; nothing here writes to a stream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How serious a diagnostic is. Drives colouring and `--fail-on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Info")]
    Info,
    #[serde(alias = "Warning")]
    Warning,
    #[serde(alias = "Error")]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Stable identifiers for each kind of diagnostic, used in config files and machine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleCode {
    MismatchedClosingTag,
    UnclosedTags,
    UnterminatedClosingTag,
    UnterminatedComment,
}

impl RuleCode {
    pub const ALL: [RuleCode; 4] = [
        RuleCode::MismatchedClosingTag,
        RuleCode::UnclosedTags,
        RuleCode::UnterminatedClosingTag,
        RuleCode::UnterminatedComment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MismatchedClosingTag => "TAG001",
            Self::UnclosedTags => "TAG002",
            Self::UnterminatedClosingTag => "TAG003",
            Self::UnterminatedComment => "TAG004",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MismatchedClosingTag => "Closing tag does not match the most recently opened tag",
            Self::UnclosedTags => "Opening tags left unclosed at end of input",
            Self::UnterminatedClosingTag => "Closing tag without a terminating '>'",
            Self::UnterminatedComment => "Comment without a terminating '-->'",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Self::MismatchedClosingTag | Self::UnclosedTags => Severity::Error,
            Self::UnterminatedClosingTag | Self::UnterminatedComment => Severity::Warning,
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        RuleCode::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| format!("Unknown rule code: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `</name>` that does not match the top of the tag stack.
    /// `last_opened` is the stack top at that moment, if any.
    MismatchedClosingTag { name: String, last_opened: Option<String> },
    /// Tags still open when the end of input was reached, in opening order.
    UnclosedTags { names: Vec<String> },
    /// A `</` with no `>` anywhere after it. Scanning stops here.
    UnterminatedClosingTag { name: String },
    /// A `<!--` with no `-->` anywhere after it. Scanning stops here.
    UnterminatedComment,
}

impl DiagnosticKind {
    pub fn code(&self) -> RuleCode {
        match self {
            Self::MismatchedClosingTag { .. } => RuleCode::MismatchedClosingTag,
            Self::UnclosedTags { .. } => RuleCode::UnclosedTags,
            Self::UnterminatedClosingTag { .. } => RuleCode::UnterminatedClosingTag,
            Self::UnterminatedComment => RuleCode::UnterminatedComment,
        }
    }

    /// Tag names carried by this diagnostic.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::MismatchedClosingTag { name, .. } | Self::UnterminatedClosingTag { name } => vec![name.as_str()],
            Self::UnclosedTags { names } => names.iter().map(String::as_str).collect(),
            Self::UnterminatedComment => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset of the construct in the source text.
    pub offset: usize,
    /// Character index of the construct, as reported in legacy output.
    pub index: usize,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, offset: usize, index: usize) -> Self {
        let severity = kind.code().default_severity();
        Self {
            kind,
            offset,
            index,
            severity,
        }
    }

    pub fn code(&self) -> RuleCode {
        self.kind.code()
    }

    /// One-line human readable message, used by the text, concise and JSON formats.
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::MismatchedClosingTag {
                name,
                last_opened: Some(top),
            } => format!("Mismatched closing tag </{name}> (last opened was <{top}>)"),
            DiagnosticKind::MismatchedClosingTag { name, last_opened: None } => {
                format!("Mismatched closing tag </{name}>")
            }
            DiagnosticKind::UnclosedTags { names } => format!("Unclosed tags: {}", names.join(", ")),
            DiagnosticKind::UnterminatedClosingTag { name } => format!("Unterminated closing tag </{name}>"),
            DiagnosticKind::UnterminatedComment => "Unterminated comment".to_string(),
        }
    }
}
