//! Mapping between prompt answers and handler descriptors

use crate::descriptor::{
    Emulation, HandlerDescriptor, HookSettings, Identity, PlayerLimits,
};
use crate::generator::types::HandlerAnswers;

/// Strip one pair of enclosing quotes and collapse `\\` to `\`.
pub fn normalize_path(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    let unquoted = input
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(input);
    unquoted.replace("\\\\", "\\")
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Starting point for a handler with no built-in preset: Steam emulation
/// follows the presence of a Steam ID, XInput stays on and DInput is forced off.
pub fn generated_base(answers: &HandlerAnswers) -> HandlerDescriptor {
    let has_steam = !answers.steam_id.is_empty();

    let mut d = HandlerDescriptor {
        emulation: Emulation {
            needs_steam_emulation: has_steam,
            use_goldberg: has_steam,
            create_steam_app_id_by_exe: has_steam,
            ..Default::default()
        },
        hook: HookSettings {
            xinput_enabled: true,
            xinput_reroute: None,
            dinput_enabled: false,
            dinput_force_disable: true,
            custom_dll_enabled: true,
        },
        ..Default::default()
    };
    d.layout.working_folder = Some(String::new());
    d
}

/// Overlay the prompted fields onto `base`; everything not asked for is kept.
pub fn apply_answers(mut d: HandlerDescriptor, answers: &HandlerAnswers) -> HandlerDescriptor {
    d.identity = Identity {
        executable_name: answers.executable_name.clone(),
        guid: answers.handler_name.clone(),
        game_name: answers.game_name.clone(),
        steam_id: optional(&answers.steam_id),
    };
    d.players = PlayerLimits {
        max_players: answers.max_players,
        max_players_one_monitor: answers.max_players,
    };

    let layout = &mut d.layout;
    layout.binaries_folder = answers.binaries_folder.clone();
    layout.working_folder = match (answers.working_folder.is_empty(), layout.working_folder.take()) {
        (true, None) => None,
        _ => Some(answers.working_folder.clone()),
    };
    layout.user_profile_config_path = optional(&answers.user_profile_config_path);
    layout.user_profile_save_path = optional(&answers.user_profile_save_path);
    layout.user_profile_save_path_no_copy = answers.user_profile_save_path_no_copy;
    layout.use_nucleus_environment = answers.use_nucleus_environment;
    layout.symlink_game = answers.symlink_game;
    layout.symlink_exe = answers.symlink_exe;

    d.input.supports_keyboard = Some(answers.supports_keyboard);
    d
}

pub fn descriptor_from_answers(answers: &HandlerAnswers) -> HandlerDescriptor {
    apply_answers(generated_base(answers), answers)
}

/// Prompt defaults taken from an existing descriptor.
pub fn answers_from_descriptor(d: &HandlerDescriptor, handler_name: &str) -> HandlerAnswers {
    HandlerAnswers {
        handler_name: handler_name.to_string(),
        game_name: d.identity.game_name.clone(),
        executable_name: d.identity.executable_name.clone(),
        steam_id: d.identity.steam_id.clone().unwrap_or_default(),
        max_players: d.players.max_players,
        binaries_folder: d.layout.binaries_folder.clone(),
        working_folder: d.layout.working_folder.clone().unwrap_or_default(),
        user_profile_config_path: d.layout.user_profile_config_path.clone().unwrap_or_default(),
        user_profile_save_path: d.layout.user_profile_save_path.clone().unwrap_or_default(),
        supports_keyboard: d.input.supports_keyboard.unwrap_or(false),
        use_nucleus_environment: d.layout.use_nucleus_environment,
        user_profile_save_path_no_copy: d.layout.user_profile_save_path_no_copy,
        symlink_game: d.layout.symlink_game,
        symlink_exe: d.layout.symlink_exe,
    }
}
