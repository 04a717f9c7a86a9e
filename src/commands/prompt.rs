//! Interactive prompts on the controlling terminal.

use crate::error::AppError;
use std::io::{self, BufRead, Write};

/// Return `value` if given, otherwise ask for it.
pub fn text_or(value: Option<String>, label: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v),
        None => text(label),
    }
}

pub fn text(label: &str) -> Result<String, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ask(&mut stdin.lock(), &mut stdout.lock(), label)
}

/// Hidden password entry. With `confirm`, the value must be typed twice.
pub fn password(label: &str, confirm: bool) -> Result<String, AppError> {
    let first = rpassword::prompt_password(format!("{}: ", label)).map_err(input_error)?;
    if confirm {
        let again =
            rpassword::prompt_password("Repeat for confirmation: ").map_err(input_error)?;
        if first != again {
            return Err(AppError::Validation(
                "the two entered values do not match".into(),
            ));
        }
    }
    Ok(first)
}

/// Yes/no question, defaulting to no.
pub fn confirm(question: &str) -> Result<bool, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ask_yes_no(&mut stdin.lock(), &mut stdout.lock(), question)
}

/// Ask until a non-empty line is entered. End of input aborts.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String, AppError> {
    loop {
        write!(out, "{}: ", label).map_err(input_error)?;
        out.flush().map_err(input_error)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(input_error)? == 0 {
            return Err(AppError::Aborted);
        }
        let value = line.trim_end_matches(['\r', '\n']);
        if !value.trim().is_empty() {
            return Ok(value.to_string());
        }
    }
}

fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> Result<bool, AppError> {
    write!(out, "{} [y/N]: ", question).map_err(input_error)?;
    out.flush().map_err(input_error)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(input_error)? == 0 {
        return Ok(false);
    }
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn input_error(e: io::Error) -> AppError {
    AppError::Validation(format!("could not read input: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_returns_line_without_newline() {
        let mut input = Cursor::new("Ada\n");
        let mut out = Vec::new();
        assert_eq!(ask(&mut input, &mut out, "First name").unwrap(), "Ada");
        assert_eq!(String::from_utf8(out).unwrap(), "First name: ");
    }

    #[test]
    fn ask_repeats_on_blank_input() {
        let mut input = Cursor::new("\n   \r\nLovelace\r\n");
        let mut out = Vec::new();
        assert_eq!(ask(&mut input, &mut out, "Last name").unwrap(), "Lovelace");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Last name: Last name: Last name: "
        );
    }

    #[test]
    fn ask_aborts_on_eof() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(matches!(
            ask(&mut input, &mut out, "Email"),
            Err(AppError::Aborted)
        ));
    }

    #[test]
    fn yes_no_accepts_y_and_yes() {
        for answer in ["y\n", "Y\n", "yes\n", " YES \n"] {
            let mut input = Cursor::new(answer);
            assert!(ask_yes_no(&mut input, &mut Vec::new(), "Sure?").unwrap());
        }
    }

    #[test]
    fn yes_no_defaults_to_no() {
        for answer in ["\n", "n\n", "nope\n", ""] {
            let mut input = Cursor::new(answer);
            assert!(!ask_yes_no(&mut input, &mut Vec::new(), "Sure?").unwrap());
        }
    }
}
