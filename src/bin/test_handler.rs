use handlerkit::paths::PATH_WORKSPACE;
use handlerkit::prompt::{DialogPrompter, is_cancelled};
use handlerkit::runner::{self, SystemHostProcess};

static USAGE_TEXT: &str = r#"
Nucleus Co-op handler test runner

Usage: test-handler

Lists the handler scripts in the local handlers directory, copies the
selected one into the Nucleus Co-op handlers directory and restarts
Nucleus Co-op.

Environment:
    HANDLERKIT_ROOT       Workspace root (default: current directory)

Options:
    --help                Print this help
"#;

fn main() {
    if std::env::args().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        std::process::exit(0);
    }

    println!("[handlerkit] Nucleus Co-op Handler Test Runner");
    println!("[handlerkit] Workspace: {}", PATH_WORKSPACE.display());

    let mut prompter = DialogPrompter::new();
    let mut host = SystemHostProcess;
    match runner::run(&PATH_WORKSPACE, &mut prompter, &mut host) {
        Ok(deployed) => {
            println!("[handlerkit] Deployed {}", deployed.display());
        }
        Err(e) if is_cancelled(e.as_ref()) => {
            println!("[handlerkit] {}", e);
        }
        Err(e) => {
            eprintln!("[handlerkit] Error: {}", e);
            std::process::exit(1);
        }
    }
}
