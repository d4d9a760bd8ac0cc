//! Handlers shipped with the repository

use super::HandlerDescriptor;
use super::types::*;

const UE_SETTINGS: &str = "/Script/Engine.GameUserSettings";

/// Every built-in handler.
pub fn builtin() -> Vec<HandlerDescriptor> {
    vec![squirreled_away()]
}

/// Built-in handler by GUID, compared case-insensitively.
pub fn find(guid: &str) -> Option<HandlerDescriptor> {
    builtin()
        .into_iter()
        .find(|d| d.identity.guid.eq_ignore_ascii_case(guid.trim()))
}

/// Squirreled Away (Unreal Engine 5, Steam).
///
/// Unlocking used to disable `MouseMoveFilterID` without the lock ever
/// enabling it; the lock plan below drives both directions, so it doesn't.
pub fn squirreled_away() -> HandlerDescriptor {
    HandlerDescriptor {
        identity: Identity {
            executable_name: "SquirrelGame-Win64-Shipping.exe".to_string(),
            guid: "Squirreled Away".to_string(),
            game_name: "Squirreled Away".to_string(),
            steam_id: Some("2977620".to_string()),
        },
        players: PlayerLimits {
            max_players: 4,
            max_players_one_monitor: 4,
        },
        layout: FileLayout {
            binaries_folder: r"SquirrelGame\Binaries\Win64".to_string(),
            working_folder: None,
            user_profile_config_path: Some(
                r"AppData\Local\SquirrelGame\Saved\Config\Windows".to_string(),
            ),
            user_profile_save_path: Some(r"AppData\Local\SquirrelGame\Saved\SaveGames".to_string()),
            user_profile_save_path_no_copy: true,
            use_nucleus_environment: true,
            symlink_game: true,
            symlink_exe: false,
            symlink_folders: Some(true),
            dir_symlink_exclusions: vec![
                r"Engine\Binaries\ThirdParty\Steamworks\Steamv157\Win64".to_string(),
                r"Engine\Binaries\Win64".to_string(),
                r"SquirrelGame\Binaries\Win64".to_string(),
            ],
            file_symlink_exclusions: vec![
                "steam_api64.dll".to_string(),
                "steam_appid.txt".to_string(),
            ],
        },
        timing: Timing {
            handler_interval: 100,
            pause_between_starts: 10,
        },
        emulation: Emulation {
            needs_steam_emulation: false,
            use_goldberg: true,
            goldberg_experimental: Some(true),
            goldberg_lobby_connect: Some(false),
            use_steam_stub_drm_patcher: Some(false),
            create_steam_app_id_by_exe: true,
        },
        input: InputSettings {
            supports_keyboard: None,
            supports_multiple_keyboards_and_mice: Some(true),
            legacy: Some(LegacyInput {
                lock_input_suspends_explorer: true,
                lock_input_toggle_key: 0x23,
                ..Default::default()
            }),
        },
        proto_input: Some(ProtoInputSettings {
            inject: InjectMethod::EasyHook,
            freeze_external_input_when_input_not_locked: true,
            register_raw_input_hook: true,
            get_raw_input_data_hook: true,
            message_filter_hook: true,
            clip_cursor_hook: true,
            focus_hooks: true,
            send_mouse_wheel_messages: true,
            send_mouse_button_messages: true,
            send_mouse_movement_messages: true,
            send_keyboard_button_messages: true,
            enable_focus_message_loop: false,
            draw_fake_cursor: false,
            // WM_KILLFOCUS
            blocked_messages: vec![0x0008],
            rename_handles_hook: false,
            rename_handles: Vec::new(),
            rename_named_pipes: Vec::new(),
            xinput_hook: true,
            use_open_xinput: false,
            use_dinput_redirection: false,
            auto_hide_taskbar: false,
            lock_plan: Some(InputLockPlan {
                hooks: vec![
                    ProtoHook::GetCursorPos,
                    ProtoHook::SetCursorPos,
                    ProtoHook::GetKeyState,
                    ProtoHook::GetAsyncKeyState,
                    ProtoHook::GetKeyboardState,
                    ProtoHook::CursorVisibilityState,
                    ProtoHook::FocusHooks,
                ],
                filters: vec![
                    MessageFilter::RawInput,
                    MessageFilter::MouseActivate,
                    MessageFilter::WindowActivate,
                    MessageFilter::WindowActivateApp,
                    MessageFilter::MouseWheel,
                    MessageFilter::MouseButton,
                    MessageFilter::KeyboardButton,
                ],
                draw_fake_cursor: Some(false),
                focus_loop: Some(FocusLoop::default()),
                toggle_raw_input_bypass: true,
            }),
        }),
        hook: HookSettings {
            xinput_enabled: false,
            xinput_reroute: Some(false),
            dinput_enabled: false,
            dinput_force_disable: false,
            custom_dll_enabled: false,
        },
        play: PlaySpec {
            windowed: true,
            resolution_args: true,
            extra_args: Vec::new(),
            save_rewrites: vec![SaveRewrite {
                file: r"\GameUserSettings.ini".to_string(),
                entries: vec![
                    IniEntry::new(UE_SETTINGS, "bUseDynamicResolution", IniValue::Text("False".to_string())),
                    IniEntry::new(UE_SETTINGS, "ResolutionSizeX", IniValue::Width),
                    IniEntry::new(UE_SETTINGS, "ResolutionSizeY", IniValue::Height),
                    IniEntry::new(UE_SETTINGS, "FullscreenMode", IniValue::Text("2".to_string())),
                    IniEntry::new(UE_SETTINGS, "DesiredScreenWidth", IniValue::Width),
                    IniEntry::new(UE_SETTINGS, "DesiredScreenHeight", IniValue::Height),
                ],
            }],
        },
    }
}
