//! Handler generator
//!
//! Asks for a game's details, then writes `<Handler>/<Handler>.js`,
//! `README.md` and `<Handler>.json` under the local handlers directory.
//! A second run for the same handler offers the saved answers as defaults
//! and only replaces the directory after confirmation, moving the old one
//! to `.handlerkit/trash`.
//!
//! ## Module Structure
//! - `types.rs`: GeneratorConfig, HandlerAnswers, GenerateOutcome
//! - `pure/`: validators, path normalization, answers/descriptor mapping, README
//! - `operations.rs`: config and answers I/O, handler file output
//! - `pipelines.rs`: the interactive run

mod operations;
mod pipelines;
pub mod pure;
mod types;

pub use operations::{config_path, load_answers, load_or_create_config, save_answers};
pub use pipelines::{prompt_details, run};
pub use types::{GenerateOutcome, GeneratorConfig, HandlerAnswers};
