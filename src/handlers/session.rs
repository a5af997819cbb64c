use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use super::command_handlers::{execute, parse_command, redraw, Outcome};
use crate::state::AppState;

const PROMPT: &str = "discshelf> ";

/// Read commands line by line until `quit` or end of input, redrawing the
/// view after every change
pub fn run_session<R: BufRead, W: Write>(state: &mut AppState, input: R, mut output: W) -> Result<()> {
    writeln!(output, "{}", state.get_title().bold())?;
    write!(output, "{}", redraw(state, None))?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match execute(command, state) {
                Outcome::Redraw(message) => write!(output, "{}", redraw(state, message))?,
                Outcome::Message(text) => writeln!(output, "{}", text)?,
                Outcome::Quit => break,
            },
            Err(message) => writeln!(output, "{}", message.yellow())?,
        }
    }
    Ok(())
}
