// Generator operations - config, answers and handler file I/O

use crate::descriptor::HandlerDescriptor;
use crate::descriptor::pure::display_path;
use crate::generator::pure::{apply_answers, descriptor_from_answers, render_readme};
use crate::generator::types::{GeneratorConfig, HandlerAnswers, default_local_handlers_dir};
use crate::paths::{GENERATOR_CONFIG_FILE, resolve_in_workspace, state_dir};
use crate::prompt::{Prompter, ask_valid};

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub fn config_path(root: &Path) -> PathBuf {
    state_dir(root).join(GENERATOR_CONFIG_FILE)
}

/// Load the generator config, asking for it (and saving it) on first run.
pub fn load_or_create_config<P: Prompter + ?Sized>(
    root: &Path,
    prompter: &mut P,
) -> Result<GeneratorConfig, Box<dyn Error>> {
    let path = config_path(root);

    if path.exists() {
        let file = File::open(&path)?;
        return serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Error reading {}: {}", path.display(), e).into());
    }

    println!(
        "[handlerkit] Configuration file not found. Creating {}...",
        path.display()
    );

    let local_handlers_dir = ask_valid(
        prompter,
        "Path to local handlers directory (relative to workspace)",
        Some(&default_local_handlers_dir()),
        |input| {
            if resolve_in_workspace(root, input).is_dir() {
                Ok(())
            } else {
                Err("Invalid path. Please provide a valid relative path to the handlers directory."
                    .to_string())
            }
        },
    )?;

    let config = GeneratorConfig { local_handlers_dir };
    save_config(&path, &config)?;
    println!("[handlerkit] Configuration saved to {}", path.display());
    Ok(config)
}

fn save_config(path: &Path, config: &GeneratorConfig) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .map_err(|e| format!("Error saving configuration {}: {}", path.display(), e))?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

pub fn answers_path(handler_dir: &Path, handler_name: &str) -> PathBuf {
    handler_dir.join(format!("{}.json", handler_name))
}

/// Answers saved by a previous run, if any.
pub fn load_answers(
    handler_dir: &Path,
    handler_name: &str,
) -> Result<Option<HandlerAnswers>, Box<dyn Error>> {
    let path = answers_path(handler_dir, handler_name);
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(&path)?;
    let answers = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Error reading {}: {}", display_path(&path.to_string_lossy()), e))?;
    Ok(Some(answers))
}

pub fn save_answers(handler_dir: &Path, answers: &HandlerAnswers) -> Result<(), Box<dyn Error>> {
    let path = answers_path(handler_dir, &answers.handler_name);
    let file = File::create(&path).map_err(|e| {
        format!(
            "Error saving handler details to {}: {}",
            display_path(&path.to_string_lossy()),
            e
        )
    })?;
    serde_json::to_writer_pretty(file, answers)?;
    println!(
        "[handlerkit] Saved handler details to {}",
        display_path(&path.to_string_lossy())
    );
    Ok(())
}

/// Write `<Handler>.js`, `README.md` and `<Handler>.json` into `handler_dir`.
/// `base` carries whatever a built-in preset knows beyond the prompted fields.
pub fn write_handler_files(
    handler_dir: &Path,
    answers: &HandlerAnswers,
    base: Option<HandlerDescriptor>,
) -> Result<(), Box<dyn Error>> {
    let descriptor = match base {
        Some(base) => apply_answers(base, answers),
        None => descriptor_from_answers(answers),
    };

    let script_path = handler_dir.join(format!("{}.js", answers.handler_name));
    std::fs::write(&script_path, descriptor.to_script()).map_err(|e| {
        format!(
            "Error creating handler file {}: {}",
            display_path(&script_path.to_string_lossy()),
            e
        )
    })?;
    println!(
        "[handlerkit] Created handler file: {}",
        display_path(&script_path.to_string_lossy())
    );

    let readme_path = handler_dir.join("README.md");
    std::fs::write(&readme_path, render_readme(answers)).map_err(|e| {
        format!(
            "Error creating README file {}: {}",
            display_path(&readme_path.to_string_lossy()),
            e
        )
    })?;
    println!(
        "[handlerkit] Created README file: {}",
        display_path(&readme_path.to_string_lossy())
    );

    save_answers(handler_dir, answers)
}
