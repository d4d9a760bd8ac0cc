//! Backslash handling between on-disk, script and on-screen forms.
//!
//! Handler paths are Windows paths held in single-backslash form. Inside a
//! script string literal every backslash is doubled; on screen the doubled
//! form is collapsed back.

/// Script string literal body: backslashes doubled and double quotes escaped.
pub fn js_string(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `\\` -> `\`, for showing a path to the user.
pub fn display_path(input: &str) -> String {
    input.replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_doubles_every_backslash() {
        assert_eq!(js_string(r"MyGame\Binaries\Win64"), r"MyGame\\Binaries\\Win64");
    }

    #[test]
    fn display_reverses_escape() {
        let path = r"AppData\Local\MyGame\Saves";
        assert_eq!(display_path(&js_string(path)), path);
    }

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string(r#"Say "hi"\now"#), r#"Say \"hi\"\\now"#);
    }
}
