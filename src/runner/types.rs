use serde::{Deserialize, Serialize};

pub const DEFAULT_NUCLEUS_EXE: &str = r"C:\Program Files\Nucleus Co-op\NucleusCoop.exe";

/// `test-handler.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerConfig {
    pub nucleus_exe_path: String,
    pub nucleus_handlers_dir: String,
    /// Relative to the workspace root
    #[serde(default = "default_local_handlers_dir")]
    pub local_handlers_dir: String,
    #[serde(default)]
    pub run_as_admin: bool,
}

fn default_local_handlers_dir() -> String {
    "./handlers".to_string()
}

/// `last-handler.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastHandler {
    pub last_handler: String,
}

/// Result of asking the host to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClose {
    Closed,
    NotRunning,
}
