//! Interactive prompting
//!
//! Everything the tools ask the user goes through [`Prompter`]. The terminal
//! implementation reads stdin or any `dialog` backend; tests drive the same
//! code with [`testing::ScriptedPrompter`].

use dialog::DialogBox;
use dialog::backends::Backend;
use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Returned when the user backs out of a prompt. The binaries treat it as a
/// clean exit rather than a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation canceled by user.")
    }
}

impl Error for Cancelled {}

pub fn is_cancelled(err: &(dyn Error + 'static)) -> bool {
    err.is::<Cancelled>()
}

pub trait Prompter {
    /// Ask for a line of text. An empty answer yields `default` when one is given.
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String, Box<dyn Error>>;

    /// Show a message to the user (validation failures, hints).
    fn notify(&mut self, message: &str);

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, Box<dyn Error>> {
        let hint = if default { "y" } else { "n" };
        loop {
            let answer = self.input(&format!("{} (y/n)", message), Some(hint))?;
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None => self.notify("Please answer yes or no."),
            }
        }
    }

    /// Pick one entry from `choices`, returning its index.
    fn select(
        &mut self,
        message: &str,
        choices: &[String],
        default: usize,
    ) -> Result<usize, Box<dyn Error>> {
        if choices.is_empty() {
            return Err("Nothing to select from".into());
        }

        let mut listing = String::from(message);
        for (i, choice) in choices.iter().enumerate() {
            let marker = if i == default { '>' } else { ' ' };
            listing.push_str(&format!("\n {} {:>3}) {}", marker, i + 1, choice));
        }
        self.notify(&listing);

        let default_answer = (default.min(choices.len() - 1) + 1).to_string();
        loop {
            let answer = self.input("Enter a number", Some(&default_answer))?;
            match answer.trim().parse::<usize>() {
                Ok(n) if n >= 1 && n <= choices.len() => return Ok(n - 1),
                _ => self.notify(&format!(
                    "Please enter a number between 1 and {}.",
                    choices.len()
                )),
            }
        }
    }
}

/// Ask until `validate` accepts the answer, showing its message on rejection.
pub fn ask_valid<P, F>(
    prompter: &mut P,
    message: &str,
    default: Option<&str>,
    validate: F,
) -> Result<String, Box<dyn Error>>
where
    P: Prompter + ?Sized,
    F: Fn(&str) -> Result<(), String>,
{
    loop {
        let answer = prompter.input(message, default)?;
        match validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(reason) => prompter.notify(&reason),
        }
    }
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}

/// Terminal prompter. Reads answers straight from stdin unless a `dialog`
/// backend is supplied with [`DialogPrompter::with_backend`].
pub struct DialogPrompter {
    backend: Option<Box<dyn Backend>>,
}

impl DialogPrompter {
    pub fn new() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    fn ask_terminal(message: &str, default: Option<&str>) -> Result<Option<String>, Box<dyn Error>> {
        match default {
            Some(default) if !default.is_empty() => print!("{} [default: {}]: ", message, default),
            _ => print!("{}: ", message),
        }
        io::stdout().flush()?;
        Ok(read_answer(&mut io::stdin().lock())?)
    }
}

impl Default for DialogPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialogPrompter {
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String, Box<dyn Error>> {
        let answer = match &self.backend {
            Some(backend) => {
                let mut input = dialog::Input::new(message);
                if let Some(default) = default
                    && !default.is_empty()
                {
                    input.default(default);
                }
                input
                    .show_with::<dyn Backend>(backend)
                    .map_err(|e| format!("Prompt failed: {}", e))?
            }
            None => Self::ask_terminal(message, default)?,
        };
        let Some(answer) = answer else {
            return Err(Box::new(Cancelled));
        };

        let answer = strip_line_ending(&answer);
        if answer.trim().is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }
        Ok(answer.to_string())
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// One line from `reader`; `None` once the input is closed.
pub fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_ending(&line).to_string()))
}

/// Drop a trailing `\n`, `\r\n` or `\r` (Windows consoles send CRLF).
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPrompter;
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Backend answering input dialogs from a queue; `None` is a closed dialog.
    struct QueuedBackend {
        answers: RefCell<VecDeque<Option<String>>>,
    }

    impl QueuedBackend {
        fn boxed(answers: &[Option<&str>]) -> Box<dyn Backend> {
            Box::new(Self {
                answers: RefCell::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            })
        }
    }

    impl Backend for QueuedBackend {
        fn show_input(&self, _input: &dialog::Input) -> dialog::Result<Option<String>> {
            Ok(self.answers.borrow_mut().pop_front().flatten())
        }
        fn show_message(&self, _message: &dialog::Message) -> dialog::Result<()> {
            Ok(())
        }
        fn show_password(&self, _password: &dialog::Password) -> dialog::Result<Option<String>> {
            Ok(None)
        }
        fn show_question(&self, _question: &dialog::Question) -> dialog::Result<dialog::Choice> {
            Ok(dialog::Choice::Cancel)
        }
        fn show_file_selection(
            &self,
            _selection: &dialog::FileSelection,
        ) -> dialog::Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn dialog_prompter_uses_default_on_empty_answer() {
        let mut p = DialogPrompter::with_backend(QueuedBackend::boxed(&[Some(""), Some("\r\n")]));
        assert_eq!(p.input("Max players", Some("4")).unwrap(), "4");
        assert_eq!(p.input("Max players", Some("8")).unwrap(), "8");
    }

    #[test]
    fn dialog_prompter_strips_crlf() {
        let mut p = DialogPrompter::with_backend(QueuedBackend::boxed(&[Some("hl2.exe\r")]));
        let answer = ask_valid(&mut p, "Executable name", None, |s| {
            if s.ends_with(".exe") { Ok(()) } else { Err("bad".to_string()) }
        })
        .unwrap();
        assert_eq!(answer, "hl2.exe");
    }

    #[test]
    fn dialog_prompter_closed_dialog_is_cancellation() {
        let mut p = DialogPrompter::with_backend(QueuedBackend::boxed(&[None]));
        let err = ask_valid(&mut p, "Handler name", None, |_| Err("again".to_string())).unwrap_err();
        assert!(is_cancelled(err.as_ref()));
    }

    #[test]
    fn read_answer_reports_eof_as_none() {
        let mut reader = Cursor::new("Portal\r\nhl2.exe\n\n");
        assert_eq!(read_answer(&mut reader).unwrap().as_deref(), Some("Portal"));
        assert_eq!(read_answer(&mut reader).unwrap().as_deref(), Some("hl2.exe"));
        assert_eq!(read_answer(&mut reader).unwrap().as_deref(), Some(""));
        assert_eq!(read_answer(&mut reader).unwrap(), None);
    }

    #[test]
    fn strip_line_ending_handles_each_form() {
        assert_eq!(strip_line_ending("a\r\n"), "a");
        assert_eq!(strip_line_ending("a\n"), "a");
        assert_eq!(strip_line_ending("a\r"), "a");
        assert_eq!(strip_line_ending("a"), "a");
    }

    #[test]
    fn parse_yes_no_accepts_common_forms() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" yes "), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("No"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn confirm_uses_default_on_empty_answer() {
        let mut p = ScriptedPrompter::new([""]);
        assert!(!p.confirm("Proceed?", false).unwrap());
        let mut p = ScriptedPrompter::new([""]);
        assert!(p.confirm("Proceed?", true).unwrap());
    }

    #[test]
    fn confirm_reprompts_on_garbage() {
        let mut p = ScriptedPrompter::new(["perhaps", "yes"]);
        assert!(p.confirm("Proceed?", false).unwrap());
        assert_eq!(p.notices, vec!["Please answer yes or no.".to_string()]);
    }

    #[test]
    fn ask_valid_reprompts_until_accepted() {
        let mut p = ScriptedPrompter::new(["", "  ", "Portal"]);
        let answer = ask_valid(&mut p, "Full game name", None, |s| {
            if s.trim().is_empty() {
                Err("Game name cannot be empty.".to_string())
            } else {
                Ok(())
            }
        })
        .unwrap();
        assert_eq!(answer, "Portal");
        assert_eq!(p.notices.len(), 2);
    }

    #[test]
    fn select_returns_default_index_on_empty_answer() {
        let choices = vec!["a.js".to_string(), "b/b.js".to_string(), "c.js".to_string()];
        let mut p = ScriptedPrompter::new([""]);
        assert_eq!(p.select("Select a handler:", &choices, 1).unwrap(), 1);
        assert!(p.notices[0].contains(">   2) b/b.js"));
    }

    #[test]
    fn select_rejects_out_of_range() {
        let choices = vec!["a.js".to_string(), "b.js".to_string()];
        let mut p = ScriptedPrompter::new(["0", "3", "2"]);
        assert_eq!(p.select("Select:", &choices, 0).unwrap(), 1);
        assert_eq!(p.notices.len(), 3);
    }

    #[test]
    fn running_out_of_answers_is_cancellation() {
        let mut p = ScriptedPrompter::new(Vec::<String>::new());
        let err = p.input("Anything?", None).unwrap_err();
        assert!(is_cancelled(err.as_ref()));
    }
}
