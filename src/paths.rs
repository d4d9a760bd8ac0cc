use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const GENERATOR_CONFIG_FILE: &str = "generate-handler.config.json";
pub const RUNNER_CONFIG_FILE: &str = "test-handler.config.json";
pub const LAST_HANDLER_FILE: &str = "last-handler.json";

/// Root of the handlers workspace. Relative handler directories in the
/// config files are resolved against it.
pub static PATH_WORKSPACE: LazyLock<PathBuf> =
    LazyLock::new(|| workspace_root(env::var("HANDLERKIT_ROOT").ok().as_deref()));

/// `HANDLERKIT_ROOT` (made absolute against the cwd) or the cwd itself.
pub fn workspace_root(configured: Option<&str>) -> PathBuf {
    let root = match configured {
        Some(root) if !root.trim().is_empty() => PathBuf::from(root),
        _ => return env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    std::path::absolute(&root).unwrap_or(root)
}

/// Tool state directory (`<root>/.handlerkit`) for a given workspace root.
pub fn state_dir(root: &Path) -> PathBuf {
    root.join(".handlerkit")
}

/// Where trashed handler directories are moved to.
pub fn trash_dir(root: &Path) -> PathBuf {
    state_dir(root).join("trash")
}

/// Resolve a configured directory against the workspace root.
/// Absolute paths are returned as-is.
pub fn resolve_in_workspace(root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
