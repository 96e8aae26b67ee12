use clap::{Args, ValueEnum};

/// Fail-on mode determines which severity triggers exit code 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Exit 1 on any violation (info, warning, or error)
    Any,
    /// Exit 1 on warning or error severity violations
    Warning,
    /// Exit 1 only on error-severity violations
    Error,
    /// Always exit 0
    Never,
}

impl From<FailOn> for tagcheck_lib::config::FailOn {
    fn from(fail_on: FailOn) -> Self {
        match fail_on {
            FailOn::Any => Self::Any,
            FailOn::Warning => Self::Warning,
            FailOn::Error => Self::Error,
            FailOn::Never => Self::Never,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Classic checker wording: `Mismatched closing tag: </b> at index 6` (default)
    Legacy,
    /// One line per diagnostic with file, line, column, rule code and colour
    Text,
    /// Minimal: file:line:col CODE message
    Concise,
    /// JSON array of all diagnostics (collected across files)
    Json,
}

impl From<OutputFormat> for tagcheck_lib::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Legacy => Self::Legacy,
            OutputFormat::Text => Self::Text,
            OutputFormat::Concise => Self::Concise,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (use '-' for stdin)
    #[arg(required = false)]
    pub paths: Vec<String>,

    /// Read from stdin instead of files
    #[arg(long, help = "Read from stdin instead of files")]
    pub stdin: bool,

    /// Filename to use for stdin input (for error messages)
    #[arg(long, help = "Filename to use when reading from stdin (e.g., page.tsx)")]
    pub stdin_filename: Option<String>,

    /// Output format for diagnostics.
    ///
    /// Precedence: --output-format > config file > legacy
    #[arg(long, short = 'o', value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Control when to exit with code 1
    #[arg(
        long,
        value_enum,
        help = "Exit code behavior: 'any' exits 1 on any violation, 'warning' on warning+error, 'error' only on errors, 'never' (default) always exits 0"
    )]
    pub fail_on: Option<FailOn>,

    /// Disable specific rules (comma-separated), in addition to the config file
    #[arg(short, long)]
    pub disable: Option<String>,

    /// File extensions to check when walking directories (comma-separated)
    #[arg(long)]
    pub extensions: Option<String>,

    /// Print diagnostics, but nothing else
    #[arg(short, long, help = "Print diagnostics, but nothing else")]
    pub quiet: bool,

    /// Disable all output (but still exit with status code upon detecting diagnostics)
    #[arg(
        short,
        long,
        help = "Disable all output (but still exit with status code upon detecting diagnostics)"
    )]
    pub silent: bool,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Whether standard input is one of the inputs.
    pub fn reads_stdin(&self) -> bool {
        self.stdin || self.paths.iter().any(|p| p == "-")
    }

    /// Paths other than the `-` stdin marker.
    pub fn file_paths(&self) -> Vec<String> {
        self.paths.iter().filter(|p| p.as_str() != "-").cloned().collect()
    }
}
