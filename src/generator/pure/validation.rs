//! Prompt validators
//!
//! Each returns the message shown before asking again. Nothing is coerced:
//! an answer is either accepted as typed or rejected.

use regex::Regex;
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static RESERVED_DEVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])$").unwrap());
static INVALID_DIR_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

pub fn validate_handler_name(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("Handler name cannot be empty.".to_string());
    }
    if INVALID_DIR_CHARS.is_match(input) {
        return Err("Handler name contains invalid characters for a directory.".to_string());
    }
    if input.ends_with('.') || input.ends_with(' ') {
        return Err("Handler name cannot end with a dot or a space.".to_string());
    }
    if is_reserved_device_name(input) {
        return Err("Handler name is a reserved Windows device name.".to_string());
    }
    Ok(())
}

/// `CON`, `NUL`, `COM1`... are reserved with or without an extension.
fn is_reserved_device_name(input: &str) -> bool {
    let stem = input.split('.').next().unwrap_or(input).trim_end().to_uppercase();
    RESERVED_DEVICE.is_match(&stem)
}

pub fn validate_game_name(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("Game name cannot be empty.".to_string());
    }
    Ok(())
}

pub fn validate_executable_name(input: &str) -> Result<(), String> {
    if input.trim().is_empty() || !input.ends_with(".exe") {
        return Err("Please enter a valid .exe file name.".to_string());
    }
    Ok(())
}

pub fn validate_steam_id(input: &str) -> Result<(), String> {
    if !input.is_empty() && !DIGITS.is_match(input) {
        return Err("Steam ID must be a number or empty.".to_string());
    }
    Ok(())
}

pub fn parse_max_players(input: &str) -> Option<u32> {
    match input.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

pub fn validate_max_players(input: &str) -> Result<(), String> {
    match parse_max_players(input) {
        Some(_) => Ok(()),
        None => Err("Please enter a positive integer.".to_string()),
    }
}

pub fn validate_binaries_folder(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("Binaries folder path cannot be empty.".to_string());
    }
    Ok(())
}
