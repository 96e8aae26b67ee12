//! Input discovery and per-file checking for the CLI.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tagcheck_lib::FileResult;
use tagcheck_lib::config as tagcheck_config;

use crate::cli_utils::read_file_efficiently;


/// Display name used for stdin when no `--stdin-filename` is given.
pub const STDIN_DISPLAY_NAME: &str = "<stdin>";

/// Files to check, plus paths that could not be resolved.
#[derive(Debug, Default)]
pub struct FileSelection {
    pub files: Vec<PathBuf>,
    pub missing: Vec<String>,
}

/// Expand CLI paths into a list of files.
///
/// Explicit files are kept regardless of extension, in argument order.
/// Directories are walked and filtered by the configured extensions; each
/// directory's files are sorted by path. Duplicates are dropped.
pub fn find_files(paths: &[String], config: &tagcheck_config::Config) -> FileSelection {
    let mut selection = FileSelection::default();

    for raw in paths {
        let path = Path::new(raw);
        if path.is_file() {
            push_unique(&mut selection.files, path.to_path_buf());
        } else if path.is_dir() {
            for file in walk_directory(path, config) {
                push_unique(&mut selection.files, file);
            }
        } else {
            selection.missing.push(raw.clone());
        }
    }

    selection
}

fn push_unique(files: &mut Vec<PathBuf>, file: PathBuf) {
    if !files.contains(&file) {
        files.push(file);
    }
}

fn walk_directory(dir: &Path, config: &tagcheck_config::Config) -> Vec<PathBuf> {
    let respect_gitignore = config.global.respect_gitignore;
    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(true)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .ignore(respect_gitignore)
        .parents(respect_gitignore)
        .require_git(false);

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {e}", dir.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| config.matches_extension(path))
        .collect();

    files.sort();
    log::debug!("Found {} file(s) under {}", files.len(), dir.display());
    files
}

/// Path as shown in output: relative to the current directory when possible.
pub fn to_display_path(path: &Path) -> String {
    if path.is_relative() {
        return path.display().to_string();
    }

    let Ok(cwd) = std::env::current_dir() else {
        return path.display().to_string();
    };
    let cwd = cwd.canonicalize().unwrap_or(cwd);
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    match canonical.strip_prefix(&cwd) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Read and check one file.
pub fn process_file(path: &Path, config: &tagcheck_config::Config) -> Result<FileResult, String> {
    let display = to_display_path(path);
    log::info!("Checking {display}");
    let content = read_file_efficiently(path).map_err(|e| e.to_string())?;
    Ok(tagcheck_lib::check_file_content(&display, &content, config))
}

/// Read all of stdin and check it.
pub fn process_stdin(display_name: Option<&str>, config: &tagcheck_config::Config) -> Result<FileResult, String> {
    let display = display_name.unwrap_or(STDIN_DISPLAY_NAME);
    log::info!("Checking {display} from stdin");
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| format!("Failed to read from stdin: {e}"))?;
    Ok(tagcheck_lib::check_file_content(display, &content, config))
}
