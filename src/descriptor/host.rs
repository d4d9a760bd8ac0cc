//! Host facade
//!
//! The narrow slice of the launcher's runtime the descriptor callbacks are
//! allowed to touch. The launcher owns the real implementations; this crate
//! ships a recording host for verification and a local INI rewrite.

use super::pure::ini::apply_ini_entries;
use super::types::{FocusLoop, MessageFilter, ProtoHook};

use std::error::Error;
use std::path::Path;

/// ProtoInput's handle for one running game instance.
pub type InstanceHandle = u64;

/// One entry of the host's player list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub proto_input_instance_handle: InstanceHandle,
}

impl Player {
    pub fn new(handle: InstanceHandle) -> Self {
        Self {
            proto_input_instance_handle: handle,
        }
    }
}

/// Input-hook operations (`ProtoInput.*`) used by the lock callbacks.
pub trait ProtoInputHost {
    fn install_hook(&mut self, instance: InstanceHandle, hook: ProtoHook);
    fn uninstall_hook(&mut self, instance: InstanceHandle, hook: ProtoHook);
    fn enable_message_filter(&mut self, instance: InstanceHandle, filter: MessageFilter);
    fn disable_message_filter(&mut self, instance: InstanceHandle, filter: MessageFilter);
    fn set_draw_fake_cursor(&mut self, instance: InstanceHandle, enabled: bool);
    fn start_focus_message_loop(&mut self, instance: InstanceHandle, focus_loop: FocusLoop);
    fn stop_focus_message_loop(&mut self, instance: InstanceHandle);
    fn set_raw_input_bypass(&mut self, instance: InstanceHandle, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Ini,
}

/// `Nucleus.IniSaveInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSaveInfo {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// Per-instance launch context handed to `Play`.
pub trait PlayContext {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Root of the instance's virtual user profile
    fn environment_player(&self) -> &str;
    fn user_profile_config_path(&self) -> &str;
    fn set_start_arguments(&mut self, args: String);

    /// Batch key/value rewrite of a save or config file. `source` may be
    /// missing, in which case the entries make up a new file at `dest`.
    fn modify_save_file(
        &mut self,
        source: &Path,
        dest: &Path,
        save_type: SaveType,
        entries: &[IniSaveInfo],
    ) -> Result<(), Box<dyn Error>> {
        match save_type {
            SaveType::Ini => {
                let content = if source.exists() {
                    std::fs::read_to_string(source).map_err(|e| {
                        format!("Error reading save file {}: {}", source.display(), e)
                    })?
                } else {
                    String::new()
                };

                let patched = apply_ini_entries(&content, entries);

                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(dest, patched)
                    .map_err(|e| format!("Error writing save file {}: {}", dest.display(), e))?;
            }
        }
        Ok(())
    }
}

/// A single host call, as seen by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    InstallHook(InstanceHandle, ProtoHook),
    UninstallHook(InstanceHandle, ProtoHook),
    EnableFilter(InstanceHandle, MessageFilter),
    DisableFilter(InstanceHandle, MessageFilter),
    SetDrawFakeCursor(InstanceHandle, bool),
    StartFocusLoop(InstanceHandle, FocusLoop),
    StopFocusLoop(InstanceHandle),
    SetRawInputBypass(InstanceHandle, bool),
}

/// Host that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl ProtoInputHost for RecordingHost {
    fn install_hook(&mut self, instance: InstanceHandle, hook: ProtoHook) {
        self.calls.push(HostCall::InstallHook(instance, hook));
    }

    fn uninstall_hook(&mut self, instance: InstanceHandle, hook: ProtoHook) {
        self.calls.push(HostCall::UninstallHook(instance, hook));
    }

    fn enable_message_filter(&mut self, instance: InstanceHandle, filter: MessageFilter) {
        self.calls.push(HostCall::EnableFilter(instance, filter));
    }

    fn disable_message_filter(&mut self, instance: InstanceHandle, filter: MessageFilter) {
        self.calls.push(HostCall::DisableFilter(instance, filter));
    }

    fn set_draw_fake_cursor(&mut self, instance: InstanceHandle, enabled: bool) {
        self.calls.push(HostCall::SetDrawFakeCursor(instance, enabled));
    }

    fn start_focus_message_loop(&mut self, instance: InstanceHandle, focus_loop: FocusLoop) {
        self.calls.push(HostCall::StartFocusLoop(instance, focus_loop));
    }

    fn stop_focus_message_loop(&mut self, instance: InstanceHandle) {
        self.calls.push(HostCall::StopFocusLoop(instance));
    }

    fn set_raw_input_bypass(&mut self, instance: InstanceHandle, enabled: bool) {
        self.calls.push(HostCall::SetRawInputBypass(instance, enabled));
    }
}
