//! Pure functions for the descriptor module
//!
//! No host, no filesystem: string transforms, script rendering and the
//! lock/unlock symmetry audits.

pub mod escape;
pub mod ini;
pub mod render;
pub mod script_audit;
pub mod symmetry;

pub use escape::display_path;
pub use render::render_script;
pub use script_audit::audit_script;
pub use symmetry::{SymmetryIssue, audit_symmetry};
