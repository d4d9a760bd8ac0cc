// Descriptor tests

#[cfg(test)]
mod tests {
    use crate::descriptor::pure::script_audit::audit_script;
    use crate::descriptor::pure::symmetry::IssueKind;
    use crate::descriptor::{
        HandlerDescriptor, HostCall, IniEntry, IniValue, InputLockPlan, MessageFilter,
        PlayContext, PlaySpec, Player, ProtoHook, ProtoInputSettings, RecordingHost,
        SaveRewrite, presets, start_arguments,
    };
    use std::fs;

    struct FakeContext {
        width: u32,
        height: u32,
        environment_player: String,
        config_path: String,
        start_arguments: Option<String>,
    }

    impl PlayContext for FakeContext {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn environment_player(&self) -> &str {
            &self.environment_player
        }
        fn user_profile_config_path(&self) -> &str {
            &self.config_path
        }
        fn set_start_arguments(&mut self, args: String) {
            self.start_arguments = Some(args);
        }
    }

    fn with_plan(plan: InputLockPlan) -> HandlerDescriptor {
        HandlerDescriptor {
            proto_input: Some(ProtoInputSettings {
                lock_plan: Some(plan),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn players() -> Vec<Player> {
        vec![Player::new(11), Player::new(22), Player::new(33)]
    }

    #[test]
    fn shipped_preset_is_symmetric() {
        let preset = presets::squirreled_away();
        assert!(preset.verify(&players()).is_empty());
    }

    #[test]
    fn lock_plans_are_symmetric_for_any_flag_set() {
        let plans = vec![
            InputLockPlan::default(),
            InputLockPlan {
                hooks: vec![ProtoHook::GetCursorPos],
                ..Default::default()
            },
            InputLockPlan {
                filters: vec![MessageFilter::MouseMove, MessageFilter::RawInput],
                focus_loop: Some(Default::default()),
                ..Default::default()
            },
            InputLockPlan {
                hooks: vec![ProtoHook::FocusHooks, ProtoHook::Xinput],
                filters: vec![MessageFilter::KeyboardButton],
                draw_fake_cursor: Some(true),
                focus_loop: Some(Default::default()),
                toggle_raw_input_bypass: true,
            },
        ];
        for plan in plans {
            assert!(with_plan(plan).verify(&players()).is_empty());
        }
    }

    #[test]
    fn lock_and_unlock_walk_players_in_order() {
        let d = with_plan(InputLockPlan {
            hooks: vec![ProtoHook::GetKeyState],
            ..Default::default()
        });

        let mut lock = RecordingHost::default();
        d.on_input_locked(&mut lock, &players());
        let mut unlock = RecordingHost::default();
        d.on_input_unlocked(&mut unlock, &players());

        assert_eq!(
            lock.calls,
            vec![
                HostCall::InstallHook(11, ProtoHook::GetKeyState),
                HostCall::InstallHook(22, ProtoHook::GetKeyState),
                HostCall::InstallHook(33, ProtoHook::GetKeyState),
            ]
        );
        assert_eq!(
            unlock.calls,
            vec![
                HostCall::UninstallHook(11, ProtoHook::GetKeyState),
                HostCall::UninstallHook(22, ProtoHook::GetKeyState),
                HostCall::UninstallHook(33, ProtoHook::GetKeyState),
            ]
        );
    }

    #[test]
    fn unlock_restores_bypass_and_cursor() {
        let d = with_plan(InputLockPlan {
            draw_fake_cursor: Some(true),
            toggle_raw_input_bypass: true,
            ..Default::default()
        });
        let mut unlock = RecordingHost::default();
        d.on_input_unlocked(&mut unlock, &[Player::new(5)]);
        assert_eq!(
            unlock.calls,
            vec![
                HostCall::SetDrawFakeCursor(5, false),
                HostCall::SetRawInputBypass(5, true),
            ]
        );
    }

    #[test]
    fn descriptor_without_proto_input_makes_no_calls() {
        let d = HandlerDescriptor::default();
        let mut host = RecordingHost::default();
        d.on_input_locked(&mut host, &players());
        d.on_input_unlocked(&mut host, &players());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn extra_unlock_filter_is_flagged() {
        let script = presets::squirreled_away().to_script().replace(
            "        ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.RawInputFilterID);\n",
            "        ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.RawInputFilterID);\n        ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.MouseMoveFilterID);\n",
        );
        let issues = audit_script(&script);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].target, "MouseMoveFilterID");
        assert_eq!(issues[0].issue, IssueKind::RevertedButNeverApplied);
    }

    #[test]
    fn start_arguments_carry_resolution() {
        let play = PlaySpec::default();
        assert_eq!(start_arguments(&play, 1920, 1080), " -windowed -ResX=1920 -ResY=1080");

        let play = PlaySpec {
            windowed: false,
            resolution_args: false,
            extra_args: vec!["-nosplash".to_string()],
            save_rewrites: Vec::new(),
        };
        assert_eq!(start_arguments(&play, 800, 600), " -nosplash");
    }

    #[test]
    fn play_rewrites_ini_with_instance_resolution() {
        let tmp = tempfile::tempdir().unwrap();
        let env = format!("{}/", tmp.path().display());
        let config_dir = tmp.path().join("Config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("GameUserSettings.ini"),
            "[/Script/Engine.GameUserSettings]\nResolutionSizeX=1280\nFullscreenMode=0\n",
        )
        .unwrap();

        let section = "/Script/Engine.GameUserSettings";
        let d = HandlerDescriptor {
            play: PlaySpec {
                save_rewrites: vec![SaveRewrite {
                    file: "/GameUserSettings.ini".to_string(),
                    entries: vec![
                        IniEntry::new(section, "ResolutionSizeX", IniValue::Width),
                        IniEntry::new(section, "ResolutionSizeY", IniValue::Height),
                        IniEntry::new(section, "FullscreenMode", IniValue::Text("2".to_string())),
                    ],
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        let mut ctx = FakeContext {
            width: 960,
            height: 540,
            environment_player: env,
            config_path: "Config".to_string(),
            start_arguments: None,
        };
        d.play(&mut ctx).unwrap();

        assert_eq!(ctx.start_arguments.as_deref(), Some(" -windowed -ResX=960 -ResY=540"));
        let ini = fs::read_to_string(config_dir.join("GameUserSettings.ini")).unwrap();
        assert_eq!(
            ini,
            "[/Script/Engine.GameUserSettings]\nResolutionSizeX=960\nFullscreenMode=2\nResolutionSizeY=540\n"
        );
    }

    #[test]
    fn play_creates_missing_save_file() {
        let tmp = tempfile::tempdir().unwrap();
        let d = HandlerDescriptor {
            play: PlaySpec {
                save_rewrites: vec![SaveRewrite {
                    file: "/Engine.ini".to_string(),
                    entries: vec![IniEntry::new("Core", "Fps", IniValue::Text("60".to_string()))],
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let mut ctx = FakeContext {
            width: 1,
            height: 1,
            environment_player: format!("{}/", tmp.path().display()),
            config_path: "New".to_string(),
            start_arguments: None,
        };
        d.play(&mut ctx).unwrap();
        let ini = fs::read_to_string(tmp.path().join("New").join("Engine.ini")).unwrap();
        assert_eq!(ini, "[Core]\nFps=60\n");
    }

    #[test]
    fn rendered_preset_escapes_paths() {
        let script = presets::squirreled_away().to_script();
        assert!(script.contains(r#"Game.BinariesFolder = "SquirrelGame\\Binaries\\Win64";"#));
        assert!(script.contains(
            r#"Game.UserProfileConfigPath = "AppData\\Local\\SquirrelGame\\Saved\\Config\\Windows";"#
        ));
        assert!(script.contains(r#"Game.FileSymlinkExclusions = ["steam_api64.dll", "steam_appid.txt"];"#));
        assert!(script.contains("Game.LockInputToggleKey = 0x23;"));
        assert!(script.contains("Game.ProtoInput.BlockedMessages = [0x0008];"));
        assert!(script.contains(
            r#"const saveFile1 = Context.EnvironmentPlayer + Context.UserProfileConfigPath + "\\GameUserSettings.ini";"#
        ));
        assert!(script.contains(
            r#"new Nucleus.IniSaveInfo("/Script/Engine.GameUserSettings", "ResolutionSizeX", Context.Width)"#
        ));
    }

    #[test]
    fn rendered_preset_passes_script_audit() {
        let script = presets::squirreled_away().to_script();
        assert!(script.contains("Game.ProtoInput.OnInputLocked = function () {"));
        assert!(script.contains("Game.ProtoInput.OnInputUnlocked = function () {"));
        assert!(!script.contains("MouseMoveFilterID"));
        assert!(audit_script(&script).is_empty());
    }

    #[test]
    fn missing_optional_fields_render_as_placeholders() {
        let script = HandlerDescriptor::default().to_script();
        assert!(script.contains("// Game.SteamID = \"Enter Steam App ID if applicable\";"));
        assert!(script.contains("// Game.UserProfileConfigPath = \"Optional: Path to config files\";"));
        assert!(script.contains("// Game.UserProfileSavePath = \"Optional: Path to save files\";"));
        assert!(!script.contains("Game.ProtoInput."));
        assert!(script.contains(
            "Context.StartArguments = \" -windowed\" + \" -ResX=\" + Context.Width + \" -ResY=\" + Context.Height;"
        ));
    }

    #[test]
    fn shipped_handler_file_matches_preset() {
        let shipped = include_str!("../../handlers/Squirreled Away/Squirreled Away.js");
        assert_eq!(presets::squirreled_away().to_script(), shipped);
        assert!(audit_script(shipped).is_empty());
    }

    #[test]
    fn find_preset_by_guid() {
        assert!(presets::find("squirreled away").is_some());
        assert!(presets::find("Unknown Game").is_none());
    }
}
