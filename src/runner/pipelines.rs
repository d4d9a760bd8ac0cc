// Runner pipeline - pick a handler, deploy it, restart the host

use crate::descriptor::pure::{audit_script, display_path};
use crate::prompt::Prompter;
use crate::runner::operations::{
    ResolvedConfig, copy_handler, discover_handlers, load_last_handler, load_or_create_config,
    resolve_config, save_last_handler,
};
use crate::runner::process::HostProcess;
use crate::runner::pure::{default_choice, relative_choices};
use crate::runner::types::HostClose;

use std::error::Error;
use std::path::{Path, PathBuf};

/// Stop the host, copy the handler in, start the host again. A failure at
/// any step stops the remaining ones.
pub fn deploy<H: HostProcess + ?Sized>(
    handler: &Path,
    config: &ResolvedConfig,
    host: &mut H,
) -> Result<PathBuf, Box<dyn Error>> {
    println!("[handlerkit] Checking if Nucleus Co-op is running...");
    match host.terminate(&config.nucleus_exe)? {
        HostClose::Closed => println!("[handlerkit] Nucleus Co-op closed successfully."),
        HostClose::NotRunning => println!("[handlerkit] Nucleus Co-op was not running."),
    }

    let deployed = copy_handler(handler, &config.nucleus_handlers_dir)?;

    println!("[handlerkit] Launching Nucleus Co-op...");
    host.launch(&config.nucleus_exe, config.run_as_admin)
        .map_err(|e| format!("Error launching Nucleus Co-op: {}", e))?;
    println!("[handlerkit] Nucleus Co-op launched successfully.");

    Ok(deployed)
}

/// Report lock/unlock mismatches in a handler script. Never blocks a deploy.
fn warn_asymmetric(handler: &Path) {
    let Ok(script) = std::fs::read_to_string(handler) else {
        return;
    };
    for issue in audit_script(&script) {
        eprintln!("[handlerkit] runner - Warning: {}", issue);
    }
}

/// Interactive test run rooted at `root`.
pub fn run<P, H>(root: &Path, prompter: &mut P, host: &mut H) -> Result<PathBuf, Box<dyn Error>>
where
    P: Prompter + ?Sized,
    H: HostProcess + ?Sized,
{
    let config = load_or_create_config(root, prompter)?;
    let resolved = resolve_config(root, &config)?;

    let files = discover_handlers(&resolved.local_handlers_dir)?;
    if files.is_empty() {
        return Err(format!(
            "No .js handler files found in {}",
            display_path(&resolved.local_handlers_dir.to_string_lossy())
        )
        .into());
    }

    let last = load_last_handler(root);
    let choices = relative_choices(&resolved.local_handlers_dir, &files);
    let index = prompter.select(
        "Select a handler to test:",
        &choices,
        default_choice(&files, last.as_deref()),
    )?;
    let selected = &files[index];

    if let Err(e) = save_last_handler(root, selected) {
        eprintln!("[handlerkit] Error saving last handler: {}", e);
    }

    warn_asymmetric(selected);
    deploy(selected, &resolved, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{RUNNER_CONFIG_FILE, state_dir};
    use crate::prompt::testing::ScriptedPrompter;
    use crate::runner::types::RunnerConfig;
    use std::fs;

    /// Records each step and whether the handler had been copied at that point.
    struct FakeHost {
        deployed: PathBuf,
        close: Result<HostClose, String>,
        launch_fails: bool,
        log: Vec<String>,
    }

    impl FakeHost {
        fn new(deployed: PathBuf) -> Self {
            Self {
                deployed,
                close: Ok(HostClose::Closed),
                launch_fails: false,
                log: Vec::new(),
            }
        }
    }

    impl HostProcess for FakeHost {
        fn terminate(&mut self, _exe: &Path) -> Result<HostClose, Box<dyn Error>> {
            self.log.push(format!("terminate copied={}", self.deployed.exists()));
            self.close.clone().map_err(Into::into)
        }

        fn launch(&mut self, exe: &Path, run_as_admin: bool) -> Result<(), Box<dyn Error>> {
            self.log.push(format!(
                "launch {} admin={} copied={}",
                exe.file_name().unwrap().to_string_lossy(),
                run_as_admin,
                self.deployed.exists()
            ));
            if self.launch_fails {
                return Err("no display".into());
            }
            Ok(())
        }
    }

    struct Setup {
        root: tempfile::TempDir,
        config: ResolvedConfig,
    }

    fn setup() -> Setup {
        let root = tempfile::tempdir().unwrap();
        let install = root.path().join("Nucleus");
        let host_handlers = install.join("handlers");
        fs::create_dir_all(&host_handlers).unwrap();
        fs::write(install.join("NucleusCoop.exe"), "").unwrap();

        let local = root.path().join("handlers");
        fs::create_dir_all(local.join("Alpha")).unwrap();
        fs::create_dir_all(local.join("Beta")).unwrap();
        fs::write(local.join("Alpha/Alpha.js"), "Game.GUID = \"Alpha\";\n").unwrap();
        fs::write(local.join("Beta/Beta.js"), "Game.GUID = \"Beta\";\n").unwrap();

        let config = RunnerConfig {
            nucleus_exe_path: install.join("NucleusCoop.exe").to_string_lossy().to_string(),
            nucleus_handlers_dir: host_handlers.to_string_lossy().to_string(),
            local_handlers_dir: "./handlers".to_string(),
            run_as_admin: true,
        };
        fs::create_dir_all(state_dir(root.path())).unwrap();
        fs::write(
            state_dir(root.path()).join(RUNNER_CONFIG_FILE),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();

        let resolved = resolve_config(root.path(), &config).unwrap();
        Setup {
            root,
            config: resolved,
        }
    }

    #[test]
    fn deploy_runs_terminate_copy_launch_in_order() {
        let s = setup();
        let handler = s.config.local_handlers_dir.join("Alpha/Alpha.js");
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("Alpha.js"));

        deploy(&handler, &s.config, &mut host).unwrap();
        assert_eq!(
            host.log,
            vec![
                "terminate copied=false".to_string(),
                "launch NucleusCoop.exe admin=true copied=true".to_string(),
            ]
        );
    }

    #[test]
    fn host_not_running_is_not_an_error() {
        let s = setup();
        let handler = s.config.local_handlers_dir.join("Alpha/Alpha.js");
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("Alpha.js"));
        host.close = Ok(HostClose::NotRunning);

        assert!(deploy(&handler, &s.config, &mut host).is_ok());
        assert_eq!(host.log.len(), 2);
    }

    #[test]
    fn failed_terminate_stops_before_copy() {
        let s = setup();
        let handler = s.config.local_handlers_dir.join("Alpha/Alpha.js");
        let deployed = s.config.nucleus_handlers_dir.join("Alpha.js");
        let mut host = FakeHost::new(deployed.clone());
        host.close = Err("access denied".to_string());

        assert!(deploy(&handler, &s.config, &mut host).is_err());
        assert_eq!(host.log, vec!["terminate copied=false".to_string()]);
        assert!(!deployed.exists());
    }

    #[test]
    fn failed_copy_never_launches() {
        let s = setup();
        let missing = s.config.local_handlers_dir.join("Gone/Gone.js");
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("Gone.js"));

        let err = deploy(&missing, &s.config, &mut host).unwrap_err();
        assert!(err.to_string().contains("Error copying handler"));
        assert_eq!(host.log, vec!["terminate copied=false".to_string()]);
    }

    #[test]
    fn launch_failure_is_reported() {
        let s = setup();
        let handler = s.config.local_handlers_dir.join("Alpha/Alpha.js");
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("Alpha.js"));
        host.launch_fails = true;

        let err = deploy(&handler, &s.config, &mut host).unwrap_err();
        assert!(err.to_string().contains("Error launching Nucleus Co-op"));
    }

    #[test]
    fn run_defaults_to_last_selection_and_remembers_choice() {
        let s = setup();
        let beta = s.config.local_handlers_dir.join("Beta/Beta.js");
        save_last_handler(s.root.path(), &beta).unwrap();

        let mut p = ScriptedPrompter::new([""]);
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("Beta.js"));
        let deployed = run(s.root.path(), &mut p, &mut host).unwrap();

        assert_eq!(deployed, s.config.nucleus_handlers_dir.join("Beta.js"));
        assert_eq!(p.defaults[0].as_deref(), Some("2"));

        // Picking the other one updates the remembered selection
        let mut p = ScriptedPrompter::new(["1"]);
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("Alpha.js"));
        run(s.root.path(), &mut p, &mut host).unwrap();
        assert_eq!(
            load_last_handler(s.root.path()),
            Some(s.config.local_handlers_dir.join("Alpha/Alpha.js"))
        );
    }

    #[test]
    fn run_without_handlers_fails() {
        let s = setup();
        fs::remove_dir_all(&s.config.local_handlers_dir).unwrap();
        fs::create_dir(&s.config.local_handlers_dir).unwrap();

        let mut p = ScriptedPrompter::new(Vec::<String>::new());
        let mut host = FakeHost::new(s.config.nucleus_handlers_dir.join("x.js"));
        let err = run(s.root.path(), &mut p, &mut host).unwrap_err();
        assert!(err.to_string().contains("No .js handler files found"));
        assert!(host.log.is_empty());
    }
}
