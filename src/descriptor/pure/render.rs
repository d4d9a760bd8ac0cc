//! Handler script rendering
//!
//! Turns a [`HandlerDescriptor`] into the `Game.* = ...;` script the launcher
//! loads. The lock/unlock bodies are produced by running the real callbacks
//! against a host that writes script lines instead of installing hooks.

use super::escape::js_string;
use crate::descriptor::HandlerDescriptor;
use crate::descriptor::host::{InstanceHandle, Player, ProtoInputHost};
use crate::descriptor::types::{FocusLoop, IniValue, MessageFilter, PlaySpec, ProtoHook};

const HANDLE: &str = "player.ProtoInputInstanceHandle";

pub fn render_script(d: &HandlerDescriptor) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Identity and player limits
    str_prop(&mut lines, "Game.ExecutableName", &d.identity.executable_name);
    str_prop(&mut lines, "Game.GUID", &d.identity.guid);
    str_prop(&mut lines, "Game.GameName", &d.identity.game_name);
    prop(&mut lines, "Game.MaxPlayers", d.players.max_players);
    prop(&mut lines, "Game.MaxPlayersOneMonitor", d.players.max_players_one_monitor);
    match &d.identity.steam_id {
        Some(id) => str_prop(&mut lines, "Game.SteamID", id),
        None => lines.push("// Game.SteamID = \"Enter Steam App ID if applicable\";".to_string()),
    }
    lines.push(String::new());

    // Layout
    let layout = &d.layout;
    str_prop(&mut lines, "Game.BinariesFolder", &layout.binaries_folder);
    if let Some(working) = &layout.working_folder {
        str_prop(&mut lines, "Game.WorkingFolder", working);
    }
    match &layout.user_profile_config_path {
        Some(path) => str_prop(&mut lines, "Game.UserProfileConfigPath", path),
        None => lines.push(
            "// Game.UserProfileConfigPath = \"Optional: Path to config files\";".to_string(),
        ),
    }
    match &layout.user_profile_save_path {
        Some(path) => str_prop(&mut lines, "Game.UserProfileSavePath", path),
        None => lines
            .push("// Game.UserProfileSavePath = \"Optional: Path to save files\";".to_string()),
    }
    prop(&mut lines, "Game.UserProfileSavePathNoCopy", layout.user_profile_save_path_no_copy);
    prop(&mut lines, "Game.UseNucleusEnvironment", layout.use_nucleus_environment);
    prop(&mut lines, "Game.HandlerInterval", d.timing.handler_interval);
    prop(&mut lines, "Game.PauseBetweenStarts", d.timing.pause_between_starts);
    prop(&mut lines, "Game.SymlinkGame", layout.symlink_game);
    prop(&mut lines, "Game.SymlinkExe", layout.symlink_exe);
    if let Some(folders) = layout.symlink_folders {
        prop(&mut lines, "Game.SymlinkFolders", folders);
    }
    if !layout.dir_symlink_exclusions.is_empty() {
        raw_prop(
            &mut lines,
            "Game.DirSymlinkExclusions",
            &js_array(layout.dir_symlink_exclusions.iter().map(|s| quoted(s)).collect()),
        );
    }
    if !layout.file_symlink_exclusions.is_empty() {
        raw_prop(
            &mut lines,
            "Game.FileSymlinkExclusions",
            &js_array(layout.file_symlink_exclusions.iter().map(|s| quoted(s)).collect()),
        );
    }
    lines.push(String::new());

    // Emulation
    let emu = &d.emulation;
    prop(&mut lines, "Game.NeedsSteamEmulation", emu.needs_steam_emulation);
    prop(&mut lines, "Game.UseGoldberg", emu.use_goldberg);
    if let Some(v) = emu.goldberg_experimental {
        prop(&mut lines, "Game.GoldbergExperimental", v);
    }
    if let Some(v) = emu.goldberg_lobby_connect {
        prop(&mut lines, "Game.GoldbergLobbyConnect", v);
    }
    if let Some(v) = emu.use_steam_stub_drm_patcher {
        prop(&mut lines, "Game.UseSteamStubDRMPatcher", v);
    }
    prop(&mut lines, "Game.CreateSteamAppIdByExe", emu.create_steam_app_id_by_exe);

    // Input
    if let Some(v) = d.input.supports_keyboard {
        prop(&mut lines, "Game.SupportsKeyboard", v);
    }
    if let Some(v) = d.input.supports_multiple_keyboards_and_mice {
        prop(&mut lines, "Game.SupportsMultipleKeyboardsAndMice", v);
    }
    if let Some(legacy) = &d.input.legacy {
        lines.push(String::new());
        for (name, value) in legacy.flags() {
            prop(&mut lines, &format!("Game.{}", name), value);
        }
        raw_prop(
            &mut lines,
            "Game.LockInputToggleKey",
            &format!("0x{:X}", legacy.lock_input_toggle_key),
        );
    }

    if let Some(proto) = &d.proto_input {
        lines.push(String::new());
        for (name, value) in proto.inject.flags() {
            proto_prop(&mut lines, name, value);
        }
        proto_prop(
            &mut lines,
            "FreezeExternalInputWhenInputNotLocked",
            proto.freeze_external_input_when_input_not_locked,
        );
        proto_prop(&mut lines, "RegisterRawInputHook", proto.register_raw_input_hook);
        proto_prop(&mut lines, "GetRawInputDataHook", proto.get_raw_input_data_hook);
        proto_prop(&mut lines, "MessageFilterHook", proto.message_filter_hook);
        proto_prop(&mut lines, "ClipCursorHook", proto.clip_cursor_hook);
        proto_prop(&mut lines, "FocusHooks", proto.focus_hooks);
        proto_prop(&mut lines, "SendMouseWheelMessages", proto.send_mouse_wheel_messages);
        proto_prop(&mut lines, "SendMouseButtonMessages", proto.send_mouse_button_messages);
        proto_prop(&mut lines, "SendMouseMovementMessages", proto.send_mouse_movement_messages);
        proto_prop(&mut lines, "SendKeyboardButtonMessages", proto.send_keyboard_button_messages);
        proto_prop(&mut lines, "EnableFocusMessageLoop", proto.enable_focus_message_loop);
        proto_prop(&mut lines, "DrawFakeCursor", proto.draw_fake_cursor);
        raw_prop(
            &mut lines,
            "Game.ProtoInput.BlockedMessages",
            &js_array(
                proto
                    .blocked_messages
                    .iter()
                    .map(|m| format!("0x{:04X}", m))
                    .collect(),
            ),
        );
        proto_prop(&mut lines, "RenameHandlesHook", proto.rename_handles_hook);
        raw_prop(
            &mut lines,
            "Game.ProtoInput.RenameHandles",
            &js_array(proto.rename_handles.iter().map(|s| quoted(s)).collect()),
        );
        raw_prop(
            &mut lines,
            "Game.ProtoInput.RenameNamedPipes",
            &js_array(proto.rename_named_pipes.iter().map(|s| quoted(s)).collect()),
        );
        proto_prop(&mut lines, "XinputHook", proto.xinput_hook);
        proto_prop(&mut lines, "UseOpenXinput", proto.use_open_xinput);
        proto_prop(&mut lines, "UseDinputRedirection", proto.use_dinput_redirection);
        proto_prop(&mut lines, "AutoHideTaskbar", proto.auto_hide_taskbar);
    }

    lines.push(String::new());
    prop(&mut lines, "Game.Hook.XInputEnabled", d.hook.xinput_enabled);
    if let Some(v) = d.hook.xinput_reroute {
        prop(&mut lines, "Game.Hook.XInputReroute", v);
    }
    prop(&mut lines, "Game.Hook.DInputEnabled", d.hook.dinput_enabled);
    prop(&mut lines, "Game.Hook.DInputForceDisable", d.hook.dinput_force_disable);
    prop(&mut lines, "Game.Hook.CustomDllEnabled", d.hook.custom_dll_enabled);

    if d.proto_input.as_ref().is_some_and(|p| p.lock_plan.is_some()) {
        lines.push(String::new());
        render_lock_callback(&mut lines, d, true);
        lines.push(String::new());
        render_lock_callback(&mut lines, d, false);
    }

    lines.push(String::new());
    render_play(&mut lines, &d.play);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn prop(lines: &mut Vec<String>, name: &str, value: impl std::fmt::Display) {
    lines.push(format!("{} = {};", name, value));
}

fn raw_prop(lines: &mut Vec<String>, name: &str, value: &str) {
    lines.push(format!("{} = {};", name, value));
}

fn str_prop(lines: &mut Vec<String>, name: &str, value: &str) {
    lines.push(format!("{} = {};", name, quoted(value)));
}

fn proto_prop(lines: &mut Vec<String>, name: &str, value: bool) {
    lines.push(format!("Game.ProtoInput.{} = {};", name, value));
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", js_string(value))
}

/// Arrays with three or more items go one item per line.
fn js_array(items: Vec<String>) -> String {
    if items.len() < 3 {
        return format!("[{}]", items.join(", "));
    }
    let body: Vec<String> = items.iter().map(|item| format!("    {}", item)).collect();
    format!("[\n{}\n]", body.join(",\n"))
}

/// Host that writes each call as a script line of the player loop.
#[derive(Default)]
struct ScriptWriter {
    lines: Vec<String>,
    last_group: Option<u8>,
}

impl ScriptWriter {
    fn call(&mut self, group: u8, text: String) {
        if self.last_group.is_some_and(|last| last != group) {
            self.lines.push(String::new());
        }
        self.last_group = Some(group);
        self.lines.push(format!("        {}", text));
    }
}

impl ProtoInputHost for ScriptWriter {
    fn install_hook(&mut self, _: InstanceHandle, hook: ProtoHook) {
        self.call(
            0,
            format!("ProtoInput.InstallHook({}, ProtoInput.Values.{});", HANDLE, hook.host_id()),
        );
    }

    fn uninstall_hook(&mut self, _: InstanceHandle, hook: ProtoHook) {
        self.call(
            0,
            format!("ProtoInput.UninstallHook({}, ProtoInput.Values.{});", HANDLE, hook.host_id()),
        );
    }

    fn enable_message_filter(&mut self, _: InstanceHandle, filter: MessageFilter) {
        self.call(
            1,
            format!(
                "ProtoInput.EnableMessageFilter({}, ProtoInput.Values.{});",
                HANDLE,
                filter.host_id()
            ),
        );
    }

    fn disable_message_filter(&mut self, _: InstanceHandle, filter: MessageFilter) {
        self.call(
            1,
            format!(
                "ProtoInput.DisableMessageFilter({}, ProtoInput.Values.{});",
                HANDLE,
                filter.host_id()
            ),
        );
    }

    fn set_draw_fake_cursor(&mut self, _: InstanceHandle, enabled: bool) {
        self.call(2, format!("ProtoInput.SetDrawFakeCursor({}, {});", HANDLE, enabled));
    }

    fn start_focus_message_loop(&mut self, _: InstanceHandle, l: FocusLoop) {
        self.call(
            2,
            format!(
                "ProtoInput.StartFocusMessageLoop({}, {}, {}, {}, {}, {}, {});",
                HANDLE,
                l.interval_ms,
                l.wm_activate,
                l.wm_activate_app,
                l.wm_nc_activate,
                l.wm_set_focus,
                l.wm_mouse_activate
            ),
        );
    }

    fn stop_focus_message_loop(&mut self, _: InstanceHandle) {
        self.call(2, format!("ProtoInput.StopFocusMessageLoop({});", HANDLE));
    }

    fn set_raw_input_bypass(&mut self, _: InstanceHandle, enabled: bool) {
        self.call(2, format!("ProtoInput.SetRawInputBypass({}, {});", HANDLE, enabled));
    }
}

fn render_lock_callback(lines: &mut Vec<String>, d: &HandlerDescriptor, locked: bool) {
    let mut writer = ScriptWriter::default();
    let players = [Player::new(0)];
    let name = if locked {
        d.on_input_locked(&mut writer, &players);
        "OnInputLocked"
    } else {
        d.on_input_unlocked(&mut writer, &players);
        "OnInputUnlocked"
    };

    lines.push(format!("Game.ProtoInput.{} = function () {{", name));
    lines.push("    for (let i = 0; i < PlayerList.Count; i++) {".to_string());
    lines.push("        const player = PlayerList[i];".to_string());
    lines.push(String::new());
    lines.extend(writer.lines);
    lines.push("    }".to_string());
    lines.push("};".to_string());
}

fn start_arguments_expr(play: &PlaySpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    if play.windowed {
        parts.push("\" -windowed\"".to_string());
    }
    if play.resolution_args {
        parts.push("\" -ResX=\" + Context.Width".to_string());
        parts.push("\" -ResY=\" + Context.Height".to_string());
    }
    for arg in &play.extra_args {
        parts.push(quoted(&format!(" {}", arg)));
    }
    if parts.is_empty() {
        "\"\"".to_string()
    } else {
        parts.join(" + ")
    }
}

fn render_play(lines: &mut Vec<String>, play: &PlaySpec) {
    lines.push("Game.Play = function () {".to_string());
    lines.push(format!("    Context.StartArguments = {};", start_arguments_expr(play)));

    for (i, rewrite) in play.save_rewrites.iter().enumerate() {
        let var = format!("saveFile{}", i + 1);
        lines.push(String::new());
        lines.push(format!(
            "    const {} = Context.EnvironmentPlayer + Context.UserProfileConfigPath + {};",
            var,
            quoted(&rewrite.file)
        ));
        lines.push(format!(
            "    Context.ModifySaveFile({}, {}, Nucleus.SaveType.INI, [",
            var, var
        ));
        let entries: Vec<String> = rewrite
            .entries
            .iter()
            .map(|entry| {
                let value = match &entry.value {
                    IniValue::Text(text) => quoted(text),
                    IniValue::Width => "Context.Width".to_string(),
                    IniValue::Height => "Context.Height".to_string(),
                };
                format!(
                    "        new Nucleus.IniSaveInfo({}, {}, {})",
                    quoted(&entry.section),
                    quoted(&entry.key),
                    value
                )
            })
            .collect();
        lines.push(entries.join(",\n"));
        lines.push("    ]);".to_string());
    }

    lines.push("};".to_string());
}
