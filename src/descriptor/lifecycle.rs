//! Descriptor callbacks: `Play`, `OnInputLocked`, `OnInputUnlocked`.
//!
//! None of these mutate the descriptor. The lock pair walks the player list
//! in order and both sides are driven by the same [`InputLockPlan`], so every
//! setup on lock has its teardown on unlock.

use super::HandlerDescriptor;
use super::host::{IniSaveInfo, PlayContext, Player, ProtoInputHost, SaveType};
use super::types::{IniValue, InputLockPlan, PlaySpec};

use std::error::Error;
use std::path::PathBuf;

impl HandlerDescriptor {
    fn lock_plan(&self) -> Option<&InputLockPlan> {
        self.proto_input.as_ref().and_then(|p| p.lock_plan.as_ref())
    }

    pub fn on_input_locked<H: ProtoInputHost + ?Sized>(&self, host: &mut H, players: &[Player]) {
        let Some(plan) = self.lock_plan() else {
            return;
        };

        for player in players {
            let handle = player.proto_input_instance_handle;

            for hook in &plan.hooks {
                host.install_hook(handle, *hook);
            }
            for filter in &plan.filters {
                host.enable_message_filter(handle, *filter);
            }
            if let Some(draw) = plan.draw_fake_cursor {
                host.set_draw_fake_cursor(handle, draw);
            }
            if let Some(focus_loop) = plan.focus_loop {
                host.start_focus_message_loop(handle, focus_loop);
            }
            if plan.toggle_raw_input_bypass {
                host.set_raw_input_bypass(handle, false);
            }
        }
    }

    pub fn on_input_unlocked<H: ProtoInputHost + ?Sized>(&self, host: &mut H, players: &[Player]) {
        let Some(plan) = self.lock_plan() else {
            return;
        };

        for player in players {
            let handle = player.proto_input_instance_handle;

            for hook in &plan.hooks {
                host.uninstall_hook(handle, *hook);
            }
            for filter in &plan.filters {
                host.disable_message_filter(handle, *filter);
            }
            if plan.draw_fake_cursor.is_some() {
                host.set_draw_fake_cursor(handle, false);
            }
            if plan.focus_loop.is_some() {
                host.stop_focus_message_loop(handle);
            }
            if plan.toggle_raw_input_bypass {
                host.set_raw_input_bypass(handle, true);
            }
        }
    }

    /// Set the instance's start arguments and apply the save-file rewrites.
    pub fn play<C: PlayContext + ?Sized>(&self, ctx: &mut C) -> Result<(), Box<dyn Error>> {
        let args = start_arguments(&self.play, ctx.width(), ctx.height());
        ctx.set_start_arguments(args);

        for rewrite in &self.play.save_rewrites {
            let path = PathBuf::from(format!(
                "{}{}{}",
                ctx.environment_player(),
                ctx.user_profile_config_path(),
                rewrite.file
            ));

            let entries: Vec<IniSaveInfo> = rewrite
                .entries
                .iter()
                .map(|entry| IniSaveInfo {
                    section: entry.section.clone(),
                    key: entry.key.clone(),
                    value: match &entry.value {
                        IniValue::Text(text) => text.clone(),
                        IniValue::Width => ctx.width().to_string(),
                        IniValue::Height => ctx.height().to_string(),
                    },
                })
                .collect();

            ctx.modify_save_file(&path, &path, SaveType::Ini, &entries)?;
        }

        Ok(())
    }
}

/// `" -windowed -ResX=<w> -ResY=<h> ..."`; every argument carries a leading space.
pub fn start_arguments(play: &PlaySpec, width: u32, height: u32) -> String {
    let mut args = String::new();
    if play.windowed {
        args.push_str(" -windowed");
    }
    if play.resolution_args {
        args.push_str(&format!(" -ResX={} -ResY={}", width, height));
    }
    for extra in &play.extra_args {
        args.push(' ');
        args.push_str(extra);
    }
    args
}
