//! Interactive yes/no prompt on stdin.

use fieldgen_config::migrate::Confirm;
use fieldgen_core::error::{FieldGenError, FieldGenResult};
use std::io::{self, BufRead, Write};

/// Asks on stdout and reads the answer from stdin; anything but `y`/`yes` is no
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> FieldGenResult<bool> {
        print!("{} ", prompt);
        io::stdout().flush().map_err(prompt_error)?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input).map_err(prompt_error)?;

        Ok(is_affirmative(&input))
    }
}

fn prompt_error(e: io::Error) -> FieldGenError {
    FieldGenError::Prompt {
        message: e.to_string(),
    }
}

/// Parse an operator answer
pub fn is_affirmative(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
