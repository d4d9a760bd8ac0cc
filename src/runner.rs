//! Handler test runner
//!
//! Lists every handler script under the local handlers directory, lets the
//! user pick one (the previous pick is the default), copies it into the
//! Nucleus Co-op installation and restarts the launcher.
//!
//! ## Module Structure
//! - `types.rs`: RunnerConfig, LastHandler, HostClose
//! - `pure.rs`: choice list, default selection, shell quoting
//! - `operations.rs`: config, discovery, last selection, copy
//! - `process.rs`: stopping and starting the launcher
//! - `pipelines.rs`: deploy and the interactive run

mod operations;
mod pipelines;
mod process;
pub mod pure;
mod types;

pub use operations::{
    ResolvedConfig, config_path, copy_handler, discover_handlers, load_last_handler,
    load_or_create_config, resolve_config, save_last_handler,
};
pub use pipelines::{deploy, run};
pub use process::{HostProcess, SystemHostProcess};
pub use types::{DEFAULT_NUCLEUS_EXE, HostClose, LastHandler, RunnerConfig};
