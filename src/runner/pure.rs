//! Pure helpers for the runner: choice lists, default selection, quoting.

use std::path::{Path, PathBuf};

/// Handler paths as shown in the selection list, relative to `base`.
pub fn relative_choices(base: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.strip_prefix(base)
                .unwrap_or(f)
                .to_string_lossy()
                .to_string()
        })
        .collect()
}

/// Index of the remembered handler if it is still listed, else the first.
pub fn default_choice(files: &[PathBuf], last: Option<&Path>) -> usize {
    last.and_then(|last| files.iter().position(|f| f == last))
        .unwrap_or(0)
}

/// Single-quoted string for `sh -c`.
pub fn sh_quote(input: &str) -> String {
    format!("'{}'", input.replace('\'', r"'\''"))
}

/// Double-quoted string for a PowerShell command line; backticks and
/// quotes are escaped with a backtick.
pub fn powershell_quote(input: &str) -> String {
    format!("\"{}\"", input.replace('`', "``").replace('"', "`\""))
}
