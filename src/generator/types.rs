use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `generate-handler.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default = "default_local_handlers_dir")]
    pub local_handlers_dir: String,
}

pub fn default_local_handlers_dir() -> String {
    "./handlers".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            local_handlers_dir: default_local_handlers_dir(),
        }
    }
}

/// Everything asked while generating a handler, saved as `<Handler>/<Handler>.json`
/// so the next run can offer it back as defaults. Paths are normalized
/// (single backslashes, no quotes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandlerAnswers {
    pub handler_name: String,
    pub game_name: String,
    pub executable_name: String,
    #[serde(rename = "steamID")]
    pub steam_id: String,
    pub max_players: u32,
    pub binaries_folder: String,
    pub working_folder: String,
    pub user_profile_config_path: String,
    pub user_profile_save_path: String,
    pub supports_keyboard: bool,
    pub use_nucleus_environment: bool,
    pub user_profile_save_path_no_copy: bool,
    pub symlink_game: bool,
    pub symlink_exe: bool,
}

impl Default for HandlerAnswers {
    fn default() -> Self {
        Self {
            handler_name: String::new(),
            game_name: String::new(),
            executable_name: String::new(),
            steam_id: String::new(),
            max_players: 4,
            binaries_folder: String::new(),
            working_folder: String::new(),
            user_profile_config_path: String::new(),
            user_profile_save_path: String::new(),
            supports_keyboard: false,
            use_nucleus_environment: true,
            user_profile_save_path_no_copy: true,
            symlink_game: true,
            symlink_exe: false,
        }
    }
}

/// How a generator run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Handler written to this directory
    Created(PathBuf),
    /// User declined to overwrite an existing handler; nothing was written
    Declined,
}
