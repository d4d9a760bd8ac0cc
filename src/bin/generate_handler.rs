use handlerkit::generator::{self, GenerateOutcome};
use handlerkit::paths::PATH_WORKSPACE;
use handlerkit::prompt::{DialogPrompter, is_cancelled};

static USAGE_TEXT: &str = r#"
Nucleus Co-op handler generator

Usage: generate-handler

Asks for a game's details and writes <Handler>/<Handler>.js, README.md and
<Handler>.json into the local handlers directory. Running it again for the
same handler offers the previous answers as defaults.

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

    println!("[handlerkit] Nucleus Co-op Handler Generator");
    println!("[handlerkit] Workspace: {}", PATH_WORKSPACE.display());

    let mut prompter = DialogPrompter::new();
    match generator::run(&PATH_WORKSPACE, &mut prompter) {
        Ok(GenerateOutcome::Created(_)) | Ok(GenerateOutcome::Declined) => {}
        Err(e) if is_cancelled(e.as_ref()) => {
            println!("[handlerkit] {}", e);
        }
        Err(e) => {
            eprintln!("[handlerkit] Error: {}", e);
            std::process::exit(1);
        }
    }
}
