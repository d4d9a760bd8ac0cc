// Runner operations - config, discovery, last selection, handler copy

use crate::descriptor::pure::display_path;
use crate::paths::{LAST_HANDLER_FILE, RUNNER_CONFIG_FILE, resolve_in_workspace, state_dir};
use crate::prompt::{Prompter, ask_valid};
use crate::runner::types::{DEFAULT_NUCLEUS_EXE, LastHandler, RunnerConfig};

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub fn config_path(root: &Path) -> PathBuf {
    state_dir(root).join(RUNNER_CONFIG_FILE)
}

fn must_exist(message: &'static str) -> impl Fn(&str) -> Result<(), String> {
    move |input| {
        if Path::new(input).exists() {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Load the runner config, asking for it (and saving it) on first run.
pub fn load_or_create_config<P: Prompter + ?Sized>(
    root: &Path,
    prompter: &mut P,
) -> Result<RunnerConfig, Box<dyn Error>> {
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

    let nucleus_exe_path = ask_valid(
        prompter,
        "Path to Nucleus Co-op executable (NucleusCoop.exe)",
        Some(DEFAULT_NUCLEUS_EXE),
        must_exist("Invalid path. Please provide a valid path to NucleusCoop.exe."),
    )?;

    let handlers_default = Path::new(&nucleus_exe_path)
        .parent()
        .map(|p| p.join("handlers").to_string_lossy().to_string())
        .unwrap_or_else(|| "handlers".to_string());
    let nucleus_handlers_dir = ask_valid(
        prompter,
        "Path to Nucleus Co-op handlers directory",
        Some(&handlers_default),
        must_exist("Invalid path. Please provide a valid handlers directory path."),
    )?;

    let local_handlers_dir = ask_valid(
        prompter,
        "Path to local handlers directory (relative to workspace)",
        Some("./handlers"),
        |input| {
            if resolve_in_workspace(root, input).is_dir() {
                Ok(())
            } else {
                Err("Invalid path. Please provide a valid relative path to the handlers directory."
                    .to_string())
            }
        },
    )?;

    let run_as_admin = prompter.confirm("Run Nucleus Co-op as administrator?", false)?;

    let config = RunnerConfig {
        nucleus_exe_path,
        nucleus_handlers_dir,
        local_handlers_dir,
        run_as_admin,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)
        .map_err(|e| format!("Error saving configuration {}: {}", path.display(), e))?;
    serde_json::to_writer_pretty(file, &config)?;
    println!("[handlerkit] Configuration saved to {}", path.display());

    Ok(config)
}

/// Config paths after existence checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub nucleus_exe: PathBuf,
    pub nucleus_handlers_dir: PathBuf,
    pub local_handlers_dir: PathBuf,
    pub run_as_admin: bool,
}

/// Check every configured path before anything touches the host.
pub fn resolve_config(root: &Path, config: &RunnerConfig) -> Result<ResolvedConfig, Box<dyn Error>> {
    let resolved = ResolvedConfig {
        nucleus_exe: PathBuf::from(&config.nucleus_exe_path),
        nucleus_handlers_dir: PathBuf::from(&config.nucleus_handlers_dir),
        local_handlers_dir: resolve_in_workspace(root, &config.local_handlers_dir),
        run_as_admin: config.run_as_admin,
    };

    let checks = [
        ("nucleusExePath", &resolved.nucleus_exe),
        ("nucleusHandlersDir", &resolved.nucleus_handlers_dir),
        ("localHandlersDir", &resolved.local_handlers_dir),
    ];
    for (key, path) in checks {
        if !path.exists() {
            return Err(format!(
                "Invalid path in configuration: {} ({})\nEnsure nucleusExePath, nucleusHandlersDir, and localHandlersDir are correct in {}",
                key,
                display_path(&path.to_string_lossy()),
                config_path(root).display()
            )
            .into());
        }
    }

    Ok(resolved)
}

/// Every `*.js` file below `dir`, at any depth, sorted by path.
pub fn discover_handlers(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(dir).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("js")
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// The remembered selection, if the file is readable and the handler still exists.
pub fn load_last_handler(root: &Path) -> Option<PathBuf> {
    let file = File::open(state_dir(root).join(LAST_HANDLER_FILE)).ok()?;
    let last: LastHandler = serde_json::from_reader(BufReader::new(file)).ok()?;
    let path = PathBuf::from(last.last_handler);
    path.exists().then_some(path)
}

pub fn save_last_handler(root: &Path, handler: &Path) -> Result<(), Box<dyn Error>> {
    let dir = state_dir(root);
    std::fs::create_dir_all(&dir)?;
    let handler = std::path::absolute(handler)?;
    let file = File::create(dir.join(LAST_HANDLER_FILE))?;
    serde_json::to_writer_pretty(
        file,
        &LastHandler {
            last_handler: handler.to_string_lossy().to_string(),
        },
    )?;
    Ok(())
}

/// Copy a handler script into the host's handlers directory, replacing any
/// file of the same name.
pub fn copy_handler(handler: &Path, host_handlers_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let file_name = handler
        .file_name()
        .ok_or_else(|| format!("Not a handler file: {}", handler.display()))?;
    let dest = host_handlers_dir.join(file_name);

    std::fs::copy(handler, &dest).map_err(|e| {
        format!(
            "Error copying handler to {}: {}",
            display_path(&host_handlers_dir.to_string_lossy()),
            e
        )
    })?;

    println!(
        "[handlerkit] Copied {} to {}",
        file_name.to_string_lossy(),
        display_path(&host_handlers_dir.to_string_lossy())
    );
    Ok(dest)
}
