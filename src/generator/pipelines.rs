// Generator pipeline - prompt for a handler and write it out

use crate::descriptor::presets;
use crate::descriptor::pure::display_path;
use crate::generator::operations::{config_path, load_answers, load_or_create_config, write_handler_files};
use crate::generator::pure::{
    answers_from_descriptor, normalize_path, parse_max_players, validate_binaries_folder,
    validate_executable_name, validate_game_name, validate_handler_name, validate_max_players,
    validate_steam_id,
};
use crate::generator::types::{GenerateOutcome, HandlerAnswers};
use crate::paths::{resolve_in_workspace, trash_dir};
use crate::prompt::{Prompter, ask_valid};
use crate::util::move_to_trash;

use std::error::Error;
use std::path::Path;

fn no_check(_: &str) -> Result<(), String> {
    Ok(())
}

/// Threads the answers through each prompt in order; every prompt offers the
/// matching field of `previous` as its default.
struct DetailsBuilder<'a, P: Prompter + ?Sized> {
    prompter: &'a mut P,
    previous: &'a HandlerAnswers,
    answers: HandlerAnswers,
}

impl<'a, P: Prompter + ?Sized> DetailsBuilder<'a, P> {
    fn new(prompter: &'a mut P, previous: &'a HandlerAnswers) -> Self {
        Self {
            prompter,
            previous,
            answers: HandlerAnswers::default(),
        }
    }

    fn text<V>(
        mut self,
        message: &str,
        validate: V,
        field: fn(&mut HandlerAnswers) -> &mut String,
    ) -> Result<Self, Box<dyn Error>>
    where
        V: Fn(&str) -> Result<(), String>,
    {
        let mut previous = self.previous.clone();
        let default = field(&mut previous).clone();
        let answer = ask_valid(&mut *self.prompter, message, Some(&default), validate)?;
        *field(&mut self.answers) = answer;
        Ok(self)
    }

    fn path(
        self,
        message: &str,
        validate: fn(&str) -> Result<(), String>,
        field: fn(&mut HandlerAnswers) -> &mut String,
    ) -> Result<Self, Box<dyn Error>> {
        let mut built = self.text(message, validate, field)?;
        let value = field(&mut built.answers);
        *value = normalize_path(value);
        Ok(built)
    }

    fn flag(
        mut self,
        message: &str,
        field: fn(&mut HandlerAnswers) -> &mut bool,
    ) -> Result<Self, Box<dyn Error>> {
        let mut previous = self.previous.clone();
        let default = *field(&mut previous);
        *field(&mut self.answers) = self.prompter.confirm(message, default)?;
        Ok(self)
    }

    fn max_players(mut self, message: &str) -> Result<Self, Box<dyn Error>> {
        let default = self.previous.max_players.to_string();
        let answer = ask_valid(&mut *self.prompter, message, Some(&default), validate_max_players)?;
        self.answers.max_players = parse_max_players(&answer).unwrap_or(self.previous.max_players);
        Ok(self)
    }

    fn finish(self) -> HandlerAnswers {
        self.answers
    }
}

/// Ask every handler detail except the name.
pub fn prompt_details<P: Prompter + ?Sized>(
    prompter: &mut P,
    previous: &HandlerAnswers,
) -> Result<HandlerAnswers, Box<dyn Error>> {
    let answers = DetailsBuilder::new(prompter, previous)
        .text("Full game name", validate_game_name, |a| &mut a.game_name)?
        .text(
            "Game executable name (e.g., MyGame-Win64-Shipping.exe)",
            validate_executable_name,
            |a| &mut a.executable_name,
        )?
        .text("Steam App ID (leave blank if none)", validate_steam_id, |a| &mut a.steam_id)?
        .max_players("Maximum number of players supported")?
        .path(
            r"Path to game binaries folder (relative to game root, e.g., MyGame\Binaries\Win64)",
            validate_binaries_folder,
            |a| &mut a.binaries_folder,
        )?
        .path(
            "Working folder path (relative to game root, leave blank if same as executable folder)",
            no_check,
            |a| &mut a.working_folder,
        )?
        .path(
            r"Path to user profile config (optional, e.g., AppData\Local\MyGame\Config)",
            no_check,
            |a| &mut a.user_profile_config_path,
        )?
        .path(
            r"Path to user profile save (optional, e.g., AppData\Local\MyGame\Saves)",
            no_check,
            |a| &mut a.user_profile_save_path,
        )?
        .flag("Does the game support keyboard input?", |a| &mut a.supports_keyboard)?
        .flag("Use Nucleus environment for this handler?", |a| {
            &mut a.use_nucleus_environment
        })?
        .flag(
            "Prevent copying of save files (UserProfileSavePathNoCopy)?",
            |a| &mut a.user_profile_save_path_no_copy,
        )?
        .flag("Symlink the game files to a temporary directory?", |a| &mut a.symlink_game)?
        .flag("Symlink the game executable (if SymlinkGame is enabled)?", |a| {
            &mut a.symlink_exe
        })?
        .finish();

    Ok(answers)
}

/// Interactive handler generation rooted at `root`.
pub fn run<P: Prompter + ?Sized>(
    root: &Path,
    prompter: &mut P,
) -> Result<GenerateOutcome, Box<dyn Error>> {
    let config = load_or_create_config(root, prompter)?;
    let handlers_dir = resolve_in_workspace(root, &config.local_handlers_dir);

    if !handlers_dir.is_dir() {
        return Err(format!(
            "Invalid handlers directory path: {}\nEnsure localHandlersDir is correct in {}",
            display_path(&handlers_dir.to_string_lossy()),
            config_path(root).display()
        )
        .into());
    }

    let handler_name = ask_valid(
        prompter,
        "Handler name (used as directory name and `<Handler name>.js`)",
        None,
        validate_handler_name,
    )?
    .trim()
    .to_string();

    let handler_dir = handlers_dir.join(&handler_name);
    let shown_dir = display_path(&handler_dir.to_string_lossy());
    let preset = presets::find(&handler_name);

    let previous = match load_answers(&handler_dir, &handler_name)? {
        Some(answers) => {
            println!(
                "[handlerkit] Previous handler details found for '{}'. Pre-filling prompts...",
                handler_name
            );
            answers
        }
        None => match &preset {
            Some(d) => {
                println!(
                    "[handlerkit] Built-in handler found for '{}'. Pre-filling prompts...",
                    handler_name
                );
                answers_from_descriptor(d, &handler_name)
            }
            None => {
                println!(
                    "[handlerkit] No previous details for '{}'. Proceeding with new details.",
                    handler_name
                );
                HandlerAnswers::default()
            }
        },
    };

    let mut answers = prompt_details(prompter, &previous)?;
    answers.handler_name = handler_name;

    if handler_dir.exists() {
        let message = format!(
            "Handler directory '{}' already exists. Overwriting will move existing files to {}. Proceed? (This action is destructive)",
            shown_dir,
            trash_dir(root).display()
        );
        if !prompter.confirm(&message, false)? {
            println!("[handlerkit] Operation canceled by user.");
            return Ok(GenerateOutcome::Declined);
        }

        let trashed = move_to_trash(&handler_dir, &trash_dir(root))
            .map_err(|e| format!("Error moving {} to trash: {}", shown_dir, e))?;
        println!(
            "[handlerkit] Moved existing directory '{}' to {}",
            shown_dir,
            trashed.display()
        );
    }

    std::fs::create_dir_all(&handler_dir)
        .map_err(|e| format!("Error creating handler directory {}: {}", shown_dir, e))?;
    println!("[handlerkit] Created handler directory: {}", shown_dir);

    write_handler_files(&handler_dir, &answers, preset)?;

    println!("[handlerkit] Handler generation complete!");
    println!("[handlerkit] Handler created at: {}", shown_dir);
    Ok(GenerateOutcome::Created(handler_dir))
}
