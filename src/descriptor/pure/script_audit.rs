//! Symmetry audit for handler scripts on disk
//!
//! Scans the `OnInputLocked` / `OnInputUnlocked` bodies of a handler script
//! for ProtoInput calls. Hand-written handlers never went through
//! [`crate::descriptor::HandlerDescriptor`], so this is how the runner catches
//! an asymmetric pair before deploying it.

use super::symmetry::{Action, ActionKind, SymmetryIssue, action, audit_actions};

use regex::Regex;
use std::sync::LazyLock;

static PROTO_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"ProtoInput\.(InstallHook|UninstallHook|EnableMessageFilter|DisableMessageFilter)\s*\([^,]+,\s*ProtoInput\.Values\.(\w+)\s*\)",
    )
    .unwrap()
});

static FOCUS_LOOP_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ProtoInput\.(StartFocusMessageLoop|StopFocusMessageLoop)\s*\(").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Locked,
    Unlocked,
}

fn section_start(line: &str) -> Option<Section> {
    if !line.contains("function") {
        return None;
    }
    if line.contains("OnInputUnlocked") {
        Some(Section::Unlocked)
    } else if line.contains("OnInputLocked") {
        Some(Section::Locked)
    } else if line.contains("Game.") {
        Some(Section::Other)
    } else {
        None
    }
}

/// Setup and teardown actions found in the lock and unlock bodies. The
/// script loops over all players, so everything is reported as instance 0.
pub fn script_actions(script: &str) -> (Vec<Action>, Vec<Action>) {
    let mut setup = Vec::new();
    let mut teardown = Vec::new();
    let mut section = Section::Other;

    for line in script.lines() {
        if let Some(next) = section_start(line) {
            section = next;
        }
        let code = line.split("//").next().unwrap_or_default();

        for caps in PROTO_CALL.captures_iter(code) {
            let target = &caps[2];
            let (kind, is_setup) = match &caps[1] {
                "InstallHook" => (ActionKind::Hook, true),
                "UninstallHook" => (ActionKind::Hook, false),
                "EnableMessageFilter" => (ActionKind::Filter, true),
                _ => (ActionKind::Filter, false),
            };
            push(&mut setup, &mut teardown, section, is_setup, action(0, kind, target));
        }

        for caps in FOCUS_LOOP_CALL.captures_iter(code) {
            let is_setup = &caps[1] == "StartFocusMessageLoop";
            push(
                &mut setup,
                &mut teardown,
                section,
                is_setup,
                action(0, ActionKind::FocusLoop, ""),
            );
        }
    }

    (setup, teardown)
}

fn push(
    setup: &mut Vec<Action>,
    teardown: &mut Vec<Action>,
    section: Section,
    is_setup: bool,
    action: Action,
) {
    // Teardown calls inside the lock body (and vice versa) still count
    // against the phase they run in.
    match (section, is_setup) {
        (Section::Locked, true) => setup.push(action),
        (Section::Unlocked, false) => teardown.push(action),
        _ => {}
    }
}

pub fn audit_script(script: &str) -> Vec<SymmetryIssue> {
    let (setup, teardown) = script_actions(script);
    audit_actions(&setup, &teardown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::pure::symmetry::IssueKind;

    const ASYMMETRIC: &str = r#"
Game.ProtoInput.OnInputLocked = function () {
    for (let i = 0; i < PlayerList.Count; i++) {
        const player = PlayerList[i];
        ProtoInput.InstallHook(player.ProtoInputInstanceHandle, ProtoInput.Values.GetCursorPosHookID);
        ProtoInput.EnableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.RawInputFilterID);
        ProtoInput.StartFocusMessageLoop(player.ProtoInputInstanceHandle, 5, true, true, true, true, true);
    }
};

Game.ProtoInput.OnInputUnlocked = function () {
    for (let i = 0; i < PlayerList.Count; i++) {
        const player = PlayerList[i];
        ProtoInput.UninstallHook(player.ProtoInputInstanceHandle, ProtoInput.Values.GetCursorPosHookID);
        ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.RawInputFilterID);
        ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.MouseMoveFilterID);
        ProtoInput.StopFocusMessageLoop(player.ProtoInputInstanceHandle);
    }
};

Game.Play = function () {
    Context.StartArguments = " -windowed";
};
"#;

    #[test]
    fn finds_unlock_only_filter() {
        let issues = audit_script(ASYMMETRIC);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].target, "MouseMoveFilterID");
        assert_eq!(issues[0].kind, ActionKind::Filter);
        assert_eq!(issues[0].issue, IssueKind::RevertedButNeverApplied);
    }

    #[test]
    fn collects_calls_per_phase() {
        let (setup, teardown) = script_actions(ASYMMETRIC);
        assert_eq!(setup.len(), 3);
        assert_eq!(teardown.len(), 4);
    }

    #[test]
    fn commented_out_calls_are_ignored() {
        let script = ASYMMETRIC.replace(
            "        ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.MouseMoveFilterID);",
            "        // ProtoInput.DisableMessageFilter(player.ProtoInputInstanceHandle, ProtoInput.Values.MouseMoveFilterID);",
        );
        assert!(audit_script(&script).is_empty());
    }

    #[test]
    fn script_without_callbacks_is_clean() {
        let script = "Game.ExecutableName = \"a.exe\";\nGame.Play = function () {\n};\n";
        assert!(audit_script(script).is_empty());
    }
}
