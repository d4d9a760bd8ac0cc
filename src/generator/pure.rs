//! Pure functions for the generator: validation, answer mapping, README text.

mod answers;
mod readme;
mod validation;

pub use answers::{
    answers_from_descriptor, apply_answers, descriptor_from_answers, generated_base,
    normalize_path,
};
pub use readme::render_readme;
pub use validation::{
    parse_max_players, validate_binaries_folder, validate_executable_name, validate_game_name,
    validate_handler_name, validate_max_players, validate_steam_id,
};
