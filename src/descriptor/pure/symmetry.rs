//! Lock/unlock symmetry audit
//!
//! Whatever `OnInputLocked` turns on for an instance, `OnInputUnlocked` has
//! to turn off again for the same instance, and unlock must not tear down
//! anything lock never set up.

use crate::descriptor::host::{HostCall, InstanceHandle};

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActionKind {
    Hook,
    Filter,
    FocusLoop,
}

/// A setup (lock side) or teardown (unlock side) of one hook, filter or loop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Action {
    pub instance: InstanceHandle,
    pub kind: ActionKind,
    /// Host id, e.g. `GetCursorPosHookID`
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Set up on lock, never torn down on unlock
    NotReverted,
    /// Torn down on unlock, never set up on lock
    RevertedButNeverApplied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryIssue {
    pub instance: InstanceHandle,
    pub kind: ActionKind,
    pub target: String,
    pub issue: IssueKind,
}

impl fmt::Display for SymmetryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ActionKind::Hook => "hook",
            ActionKind::Filter => "message filter",
            ActionKind::FocusLoop => "focus message loop",
        };
        match self.issue {
            IssueKind::NotReverted => write!(
                f,
                "instance {}: {} {} is set up on input lock but never removed on unlock",
                self.instance, what, self.target
            ),
            IssueKind::RevertedButNeverApplied => write!(
                f,
                "instance {}: {} {} is removed on input unlock but never set up on lock",
                self.instance, what, self.target
            ),
        }
    }
}

/// Setup actions out of calls made by the lock callback.
pub fn setup_actions(calls: &[HostCall]) -> Vec<Action> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::InstallHook(i, hook) => Some(action(*i, ActionKind::Hook, hook.host_id())),
            HostCall::EnableFilter(i, filter) => {
                Some(action(*i, ActionKind::Filter, filter.host_id()))
            }
            HostCall::StartFocusLoop(i, _) => Some(action(*i, ActionKind::FocusLoop, "")),
            _ => None,
        })
        .collect()
}

/// Teardown actions out of calls made by the unlock callback.
pub fn teardown_actions(calls: &[HostCall]) -> Vec<Action> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::UninstallHook(i, hook) => Some(action(*i, ActionKind::Hook, hook.host_id())),
            HostCall::DisableFilter(i, filter) => {
                Some(action(*i, ActionKind::Filter, filter.host_id()))
            }
            HostCall::StopFocusLoop(i) => Some(action(*i, ActionKind::FocusLoop, "")),
            _ => None,
        })
        .collect()
}

pub fn action(instance: InstanceHandle, kind: ActionKind, target: &str) -> Action {
    Action {
        instance,
        kind,
        target: target.to_string(),
    }
}

/// Compare setups against teardowns. Order does not matter, membership does.
pub fn audit_actions(setup: &[Action], teardown: &[Action]) -> Vec<SymmetryIssue> {
    let setup: BTreeSet<&Action> = setup.iter().collect();
    let teardown: BTreeSet<&Action> = teardown.iter().collect();

    let not_reverted = setup.difference(&teardown).map(|a| issue(a, IssueKind::NotReverted));
    let never_applied = teardown
        .difference(&setup)
        .map(|a| issue(a, IssueKind::RevertedButNeverApplied));

    not_reverted.chain(never_applied).collect()
}

pub fn audit_symmetry(lock_calls: &[HostCall], unlock_calls: &[HostCall]) -> Vec<SymmetryIssue> {
    audit_actions(&setup_actions(lock_calls), &teardown_actions(unlock_calls))
}

fn issue(action: &Action, issue: IssueKind) -> SymmetryIssue {
    SymmetryIssue {
        instance: action.instance,
        kind: action.kind,
        target: action.target.clone(),
        issue,
    }
}
