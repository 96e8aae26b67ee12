//! Handler for the `check` command.

use colored::*;
use std::io::{self, Write};

use tagcheck_lib::FileResult;
use tagcheck_lib::config as tagcheck_config;
use tagcheck_lib::exit_codes::exit;

use crate::CheckArgs;
use crate::cli_utils::{apply_cli_overrides, load_config_with_cli_error_handling_with_dir};
use crate::file_processor;

/// Outcome of checking every input.
#[derive(Debug, Default)]
struct CheckRun {
    results: Vec<FileResult>,
    files_checked: usize,
    had_read_errors: bool,
}

impl CheckRun {
    fn files_with_issues(&self) -> usize {
        self.results.iter().filter(|r| !r.diagnostics.is_empty()).count()
    }

    fn total_issues(&self) -> usize {
        self.results.iter().map(|r| r.diagnostics.len()).sum()
    }
}

/// Run the check command.
pub fn run_check(args: &CheckArgs, global_config_path: Option<&str>, isolated: bool) {
    let silent = args.silent;
    let file_paths = args.file_paths();

    if file_paths.is_empty() && !args.reads_stdin() {
        eprintln!("{}: No input files given", "Error".red().bold());
        eprintln!("Pass one or more files or directories, or use --stdin");
        exit::tool_error();
    }

    // 1. Use the first target path for config discovery
    let discovery_dir = file_paths.first().and_then(|first| {
        let first_path = std::path::Path::new(first);
        if first_path.is_dir() {
            Some(first_path)
        } else {
            first_path.parent().filter(|parent| parent.is_dir())
        }
    });

    // 2. Load config
    let mut config = load_config_with_cli_error_handling_with_dir(global_config_path, isolated, discovery_dir);

    // 3. Validate rule codes in config and CLI flags
    if !silent {
        for warn in tagcheck_config::validate_config(&config) {
            eprintln!("{} {}", "[config warning]".yellow(), warn.message);
        }
        for warn in tagcheck_config::validate_cli_rule_names(args.disable.as_deref()) {
            eprintln!("{} {}", "[cli warning]".yellow(), warn.message);
        }
    }

    // 4. Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    let run = check_inputs(args, &file_paths, &config);

    if !silent
        && let Err(e) = print_results(args, &config, &run)
    {
        // Broken pipe and friends: nothing more can be shown.
        log::debug!("Failed to write output: {e}");
    }

    if run.had_read_errors {
        exit::tool_error();
    }

    let should_fail = config
        .global
        .fail_on
        .threshold()
        .is_some_and(|threshold| run.results.iter().any(|r| r.has_severity_at_least(threshold)));
    if should_fail {
        exit::violations_found();
    }
}

fn check_inputs(args: &CheckArgs, file_paths: &[String], config: &tagcheck_config::Config) -> CheckRun {
    let mut run = CheckRun::default();

    if !file_paths.is_empty() {
        let selection = file_processor::find_files(file_paths, config);

        for missing in &selection.missing {
            if !args.silent {
                eprintln!(
                    "{}: Failed to read file {}: No such file or directory",
                    "Error".red().bold(),
                    missing
                );
            }
            run.had_read_errors = true;
        }

        for file in &selection.files {
            record(&mut run, file_processor::process_file(file, config), args.silent);
        }
    }

    if args.reads_stdin() {
        let result = file_processor::process_stdin(args.stdin_filename.as_deref(), config);
        record(&mut run, result, args.silent);
    }

    run
}

fn record(run: &mut CheckRun, result: Result<FileResult, String>, silent: bool) {
    match result {
        Ok(result) => {
            run.files_checked += 1;
            run.results.push(result);
        }
        Err(message) => {
            if !silent {
                eprintln!("{}: {}", "Error".red().bold(), message);
            }
            run.had_read_errors = true;
        }
    }
}

fn print_results(args: &CheckArgs, config: &tagcheck_config::Config, run: &CheckRun) -> io::Result<()> {
    let format = config.global.output_format;
    let formatter = format.create_formatter();
    let show_headers = run.results.len() > 1;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for result in &run.results {
        out.write_all(formatter.format_file(result, show_headers).as_bytes())?;
    }
    out.write_all(formatter.format_batch(&run.results).as_bytes())?;

    if format.has_summary() && !args.quiet {
        writeln!(out, "{}", summary_line(run))?;
    }

    out.flush()
}

fn summary_line(run: &CheckRun) -> String {
    let total = run.total_issues();
    if total == 0 {
        return format!(
            "{} No issues found in {} file{}",
            "Success:".green().bold(),
            run.files_checked,
            if run.files_checked == 1 { "" } else { "s" }
        );
    }

    let with_issues = run.files_with_issues();
    format!(
        "{} Found {} issue{} in {} file{} ({} file{} checked)",
        "Issues:".yellow().bold(),
        total,
        if total == 1 { "" } else { "s" },
        with_issues,
        if with_issues == 1 { "" } else { "s" },
        run.files_checked,
        if run.files_checked == 1 { "" } else { "s" }
    )
}
