//! Section-aware INI rewriting
//!
//! Backs `Context.ModifySaveFile` with `Nucleus.SaveType.INI`: each entry
//! replaces its key inside the named section, or is appended to that section,
//! or brings a new section along with it.

use crate::descriptor::host::IniSaveInfo;

pub fn apply_ini_entries(content: &str, entries: &[IniSaveInfo]) -> String {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    for entry in entries {
        set_ini_value(&mut lines, &entry.section, &entry.key, &entry.value);
    }

    let mut out = lines.join(newline);
    if !out.is_empty() {
        out.push_str(newline);
    }
    out
}

fn section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
        Some(trimmed[1..trimmed.len() - 1].trim())
    } else {
        None
    }
}

/// Line range holding the body of `section`. The empty name is the global
/// section before the first header.
fn section_bounds(lines: &[String], section: &str) -> Option<(usize, usize)> {
    let start = if section.is_empty() {
        0
    } else {
        lines
            .iter()
            .position(|l| section_header(l) == Some(section))?
            + 1
    };

    let end = lines[start..]
        .iter()
        .position(|l| section_header(l).is_some())
        .map(|offset| start + offset)
        .unwrap_or(lines.len());

    Some((start, end))
}

fn set_ini_value(lines: &mut Vec<String>, section: &str, key: &str, value: &str) {
    let Some((start, end)) = section_bounds(lines, section) else {
        if lines.last().is_some_and(|l| !l.trim().is_empty()) {
            lines.push(String::new());
        }
        lines.push(format!("[{}]", section));
        lines.push(format!("{}={}", key, value));
        return;
    };

    for line in &mut lines[start..end] {
        if let Some(replaced) = replace_ini_line(line, key, value) {
            *line = replaced;
            return;
        }
    }

    // Append after the section's last non-blank line
    let mut insert_at = end;
    while insert_at > start && lines[insert_at - 1].trim().is_empty() {
        insert_at -= 1;
    }
    lines.insert(insert_at, format!("{}={}", key, value));
}

/// `key=value` line for `key`, keeping indentation and `=` spacing.
fn replace_ini_line(line: &str, key: &str, value: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.starts_with(';') || trimmed.starts_with('#') {
        return None;
    }

    let eq_pos = trimmed.find('=')?;
    if trimmed[..eq_pos].trim() != key {
        return None;
    }

    let indent = line.len() - line.trim_start().len();
    let indent_str = &line[..indent];

    if trimmed.contains(" = ") {
        Some(format!("{}{} = {}", indent_str, key, value))
    } else {
        Some(format!("{}{}={}", indent_str, key, value))
    }
}
