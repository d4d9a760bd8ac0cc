//! Handler descriptor type definitions
//!
//! Field groups of a handler. Names follow the host's `Game.*` properties;
//! the host id of each enum variant is what ends up in the rendered script.

/// Which game this handler is for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Identity {
    pub executable_name: String,
    /// Unique handler id, conventionally the handler's directory name
    pub guid: String,
    pub game_name: String,
    pub steam_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLimits {
    pub max_players: u32,
    pub max_players_one_monitor: u32,
}

impl Default for PlayerLimits {
    fn default() -> Self {
        Self {
            max_players: 4,
            max_players_one_monitor: 4,
        }
    }
}

/// Where the game lives and how the host lays out each instance's copy.
/// Paths are relative, single-backslash form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileLayout {
    pub binaries_folder: String,
    pub working_folder: Option<String>,
    pub user_profile_config_path: Option<String>,
    pub user_profile_save_path: Option<String>,
    pub user_profile_save_path_no_copy: bool,
    pub use_nucleus_environment: bool,
    pub symlink_game: bool,
    pub symlink_exe: bool,
    pub symlink_folders: Option<bool>,
    /// Directories that must be copied, never symlinked
    pub dir_symlink_exclusions: Vec<String>,
    /// Files that must be copied, never symlinked
    pub file_symlink_exclusions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub handler_interval: u32,
    pub pause_between_starts: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            handler_interval: 100,
            pause_between_starts: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Emulation {
    pub needs_steam_emulation: bool,
    pub use_goldberg: bool,
    pub goldberg_experimental: Option<bool>,
    pub goldberg_lobby_connect: Option<bool>,
    pub use_steam_stub_drm_patcher: Option<bool>,
    pub create_steam_app_id_by_exe: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSettings {
    pub supports_keyboard: Option<bool>,
    pub supports_multiple_keyboards_and_mice: Option<bool>,
    pub legacy: Option<LegacyInput>,
}

/// Nucleus' own (pre-ProtoInput) hook and input forwarding switches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegacyInput {
    pub hook_set_cursor_pos: bool,
    pub hook_get_cursor_pos: bool,
    pub hook_get_key_state: bool,
    pub hook_get_async_key_state: bool,
    pub hook_get_keyboard_state: bool,
    pub hook_filter_raw_input: bool,
    pub hook_filter_mouse_messages: bool,
    pub hook_use_legacy_input: bool,
    pub hook_dont_update_legacy_in_mouse_msg: bool,
    pub hook_mouse_visibility: bool,
    pub send_normal_mouse_input: bool,
    pub send_normal_keyboard_input: bool,
    pub send_scroll_wheel: bool,
    pub forward_raw_keyboard_input: bool,
    pub forward_raw_mouse_input: bool,
    pub draw_fake_mouse_cursor: bool,
    pub lock_input_at_start: bool,
    pub lock_input_suspends_explorer: bool,
    /// Virtual-key code of the lock toggle (0x23 = End)
    pub lock_input_toggle_key: u32,
}

impl LegacyInput {
    /// `(host property, value)` pairs in render order.
    pub fn flags(&self) -> [(&'static str, bool); 18] {
        [
            ("HookSetCursorPos", self.hook_set_cursor_pos),
            ("HookGetCursorPos", self.hook_get_cursor_pos),
            ("HookGetKeyState", self.hook_get_key_state),
            ("HookGetAsyncKeyState", self.hook_get_async_key_state),
            ("HookGetKeyboardState", self.hook_get_keyboard_state),
            ("HookFilterRawInput", self.hook_filter_raw_input),
            ("HookFilterMouseMessages", self.hook_filter_mouse_messages),
            ("HookUseLegacyInput", self.hook_use_legacy_input),
            ("HookDontUpdateLegacyInMouseMsg", self.hook_dont_update_legacy_in_mouse_msg),
            ("HookMouseVisibility", self.hook_mouse_visibility),
            ("SendNormalMouseInput", self.send_normal_mouse_input),
            ("SendNormalKeyboardInput", self.send_normal_keyboard_input),
            ("SendScrollWheel", self.send_scroll_wheel),
            ("ForwardRawKeyboardInput", self.forward_raw_keyboard_input),
            ("ForwardRawMouseInput", self.forward_raw_mouse_input),
            ("DrawFakeMouseCursor", self.draw_fake_mouse_cursor),
            ("LockInputAtStart", self.lock_input_at_start),
            ("LockInputSuspendsExplorer", self.lock_input_suspends_explorer),
        ]
    }
}

/// How ProtoInput gets into the game process. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InjectMethod {
    Startup,
    RemoteLoad,
    #[default]
    EasyHook,
    EasyHookStealth,
}

impl InjectMethod {
    pub fn flags(&self) -> [(&'static str, bool); 4] {
        [
            ("InjectStartup", *self == InjectMethod::Startup),
            ("InjectRuntime_RemoteLoadMethod", *self == InjectMethod::RemoteLoad),
            ("InjectRuntime_EasyHookMethod", *self == InjectMethod::EasyHook),
            ("InjectRuntime_EasyHookStealthMethod", *self == InjectMethod::EasyHookStealth),
        ]
    }
}

/// Hooks the lock callbacks can install through `ProtoInput.InstallHook`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtoHook {
    RegisterRawInput,
    GetRawInputData,
    MessageFilter,
    GetCursorPos,
    SetCursorPos,
    GetKeyState,
    GetAsyncKeyState,
    GetKeyboardState,
    CursorVisibilityState,
    ClipCursor,
    FocusHooks,
    RenameHandles,
    Xinput,
    Dinput,
}

impl ProtoHook {
    pub fn host_id(&self) -> &'static str {
        match self {
            ProtoHook::RegisterRawInput => "RegisterRawInputHookID",
            ProtoHook::GetRawInputData => "GetRawInputDataHookID",
            ProtoHook::MessageFilter => "MessageFilterHookID",
            ProtoHook::GetCursorPos => "GetCursorPosHookID",
            ProtoHook::SetCursorPos => "SetCursorPosHookID",
            ProtoHook::GetKeyState => "GetKeyStateHookID",
            ProtoHook::GetAsyncKeyState => "GetAsyncKeyStateHookID",
            ProtoHook::GetKeyboardState => "GetKeyboardStateHookID",
            ProtoHook::CursorVisibilityState => "CursorVisibilityStateHookID",
            ProtoHook::ClipCursor => "ClipCursorHookID",
            ProtoHook::FocusHooks => "FocusHooksHookID",
            ProtoHook::RenameHandles => "RenameHandlesHookID",
            ProtoHook::Xinput => "XinputHookID",
            ProtoHook::Dinput => "DinputOrderHookID",
        }
    }
}

/// Message filters toggled through `ProtoInput.EnableMessageFilter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageFilter {
    RawInput,
    MouseMove,
    MouseActivate,
    WindowActivate,
    WindowActivateApp,
    MouseWheel,
    MouseButton,
    KeyboardButton,
}

impl MessageFilter {
    pub fn host_id(&self) -> &'static str {
        match self {
            MessageFilter::RawInput => "RawInputFilterID",
            MessageFilter::MouseMove => "MouseMoveFilterID",
            MessageFilter::MouseActivate => "MouseActivateFilterID",
            MessageFilter::WindowActivate => "WindowActivateFilterID",
            MessageFilter::WindowActivateApp => "WindowActivateAppFilterID",
            MessageFilter::MouseWheel => "MouseWheelFilterID",
            MessageFilter::MouseButton => "MouseButtonFilterID",
            MessageFilter::KeyboardButton => "KeyboardButtonFilterID",
        }
    }
}

/// Arguments of `ProtoInput.StartFocusMessageLoop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusLoop {
    pub interval_ms: u32,
    pub wm_activate: bool,
    pub wm_activate_app: bool,
    pub wm_nc_activate: bool,
    pub wm_set_focus: bool,
    pub wm_mouse_activate: bool,
}

impl Default for FocusLoop {
    fn default() -> Self {
        Self {
            interval_ms: 5,
            wm_activate: true,
            wm_activate_app: true,
            wm_nc_activate: true,
            wm_set_focus: true,
            wm_mouse_activate: true,
        }
    }
}

/// What happens to every player instance when input gets locked. Unlocking
/// reverses exactly this list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputLockPlan {
    pub hooks: Vec<ProtoHook>,
    pub filters: Vec<MessageFilter>,
    /// Fake cursor state while locked; cleared again on unlock
    pub draw_fake_cursor: Option<bool>,
    pub focus_loop: Option<FocusLoop>,
    /// Bypass raw input while unlocked, route it while locked
    pub toggle_raw_input_bypass: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProtoInputSettings {
    pub inject: InjectMethod,
    pub freeze_external_input_when_input_not_locked: bool,

    pub register_raw_input_hook: bool,
    pub get_raw_input_data_hook: bool,
    pub message_filter_hook: bool,
    pub clip_cursor_hook: bool,
    pub focus_hooks: bool,

    pub send_mouse_wheel_messages: bool,
    pub send_mouse_button_messages: bool,
    pub send_mouse_movement_messages: bool,
    pub send_keyboard_button_messages: bool,

    pub enable_focus_message_loop: bool,
    pub draw_fake_cursor: bool,
    /// Window message ids the host drops before they reach the game
    pub blocked_messages: Vec<u32>,

    pub rename_handles_hook: bool,
    pub rename_handles: Vec<String>,
    pub rename_named_pipes: Vec<String>,

    pub xinput_hook: bool,
    pub use_open_xinput: bool,
    pub use_dinput_redirection: bool,

    pub auto_hide_taskbar: bool,

    pub lock_plan: Option<InputLockPlan>,
}

/// `Game.Hook.*`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HookSettings {
    pub xinput_enabled: bool,
    pub xinput_reroute: Option<bool>,
    pub dinput_enabled: bool,
    pub dinput_force_disable: bool,
    pub custom_dll_enabled: bool,
}

/// A value written by a save-file rewrite; resolution values are taken from
/// the instance context at play time.
#[derive(Debug, Clone, PartialEq)]
pub enum IniValue {
    Text(String),
    Width,
    Height,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IniEntry {
    pub section: String,
    pub key: String,
    pub value: IniValue,
}

impl IniEntry {
    pub fn new(section: &str, key: &str, value: IniValue) -> Self {
        Self {
            section: section.to_string(),
            key: key.to_string(),
            value,
        }
    }
}

/// Rewrite of one INI file found at
/// `<environment player><user profile config path><file>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRewrite {
    pub file: String,
    pub entries: Vec<IniEntry>,
}

/// What `Play` does for each launched instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaySpec {
    pub windowed: bool,
    /// Pass `-ResX`/`-ResY` with the instance resolution
    pub resolution_args: bool,
    pub extra_args: Vec<String>,
    pub save_rewrites: Vec<SaveRewrite>,
}

impl Default for PlaySpec {
    fn default() -> Self {
        Self {
            windowed: true,
            resolution_args: true,
            extra_args: Vec::new(),
            save_rewrites: Vec::new(),
        }
    }
}
