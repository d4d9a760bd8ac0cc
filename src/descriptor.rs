//! Handler descriptors for Nucleus Co-op
//!
//! A descriptor is everything the launcher reads from a `<Handler>.js` file:
//! game identity, player limits, file layout, emulation and input flags,
//! plus the `Play`, `OnInputLocked` and `OnInputUnlocked` callbacks.
//!
//! ## Module Structure
//! - `types.rs`: field groups, hook/filter ids, lock plan, play settings
//! - `host.rs`: `ProtoInputHost` / `PlayContext` facades and a recording host
//! - `lifecycle.rs`: the three callbacks
//! - `pure/`: script rendering, escaping, INI rewrite, symmetry audits
//! - `presets.rs`: handlers shipped with the repository

mod host;
mod lifecycle;
pub mod presets;
pub mod pure;
#[cfg(test)]
mod tests;
mod types;

pub use host::{
    HostCall, IniSaveInfo, InstanceHandle, PlayContext, Player, ProtoInputHost, RecordingHost,
    SaveType,
};
pub use lifecycle::start_arguments;
pub use types::{
    Emulation, FileLayout, FocusLoop, HookSettings, Identity, IniEntry, IniValue, InjectMethod,
    InputLockPlan, InputSettings, LegacyInput, MessageFilter, PlaySpec, PlayerLimits,
    ProtoHook, ProtoInputSettings, SaveRewrite, Timing,
};

use pure::symmetry::{SymmetryIssue, audit_symmetry};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandlerDescriptor {
    pub identity: Identity,
    pub players: PlayerLimits,
    pub layout: FileLayout,
    pub timing: Timing,
    pub emulation: Emulation,
    pub input: InputSettings,
    /// `Game.ProtoInput.*`; `None` leaves the section out entirely
    pub proto_input: Option<ProtoInputSettings>,
    pub hook: HookSettings,
    pub play: PlaySpec,
}

impl HandlerDescriptor {
    /// Run both lock callbacks against a recording host and audit the calls.
    pub fn verify(&self, players: &[Player]) -> Vec<SymmetryIssue> {
        let mut lock = RecordingHost::default();
        self.on_input_locked(&mut lock, players);

        let mut unlock = RecordingHost::default();
        self.on_input_unlocked(&mut unlock, players);

        audit_symmetry(&lock.calls, &unlock.calls)
    }

    /// The `<Handler>.js` script for this descriptor.
    pub fn to_script(&self) -> String {
        pure::render_script(self)
    }
}
