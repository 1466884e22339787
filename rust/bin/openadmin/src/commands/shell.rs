//! `openadmin shell`: one session, many commands.
//!
//! Each input line is parsed exactly like command-line arguments.
//! Blank lines and `#` comments are skipped; `exit` or end of input ends
//! the session. A failed command is reported and the shell carries on.
//! `--config` and `--no-seed` only apply when the console starts and are
//! rejected here; `-o` switches the format for one line.
//! Delete confirmations read their answer from the next input line.

use std::cell::RefCell;
use std::io::{BufRead, Write};

use clap::Parser;
use tracing::debug;

use openadmin_core::{OutputFormat, Prompt, ServiceError};

use crate::Cli;
use crate::output::Output;
use crate::session::Session;

pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    format: OutputFormat,
    input: R,
    writer: W,
) -> anyhow::Result<()> {
    let lines = RefCell::new(input.lines());
    let confirmer = |prompt: &Prompt| {
        eprint!("{} [y/N]: ", prompt.title);
        match lines.borrow_mut().next() {
            Some(Ok(answer)) => answer.trim().eq_ignore_ascii_case("y"),
            _ => false,
        }
    };

    let mut out = Output::new(format, writer);
    loop {
        let line = match lines.borrow_mut().next() {
            Some(line) => line?,
            None => break,
        };
        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                out.error(&e.into())?;
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some(w) if w.starts_with('#') => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }
        debug!(line = %line, "shell command");

        let cli = match Cli::try_parse_from(std::iter::once("openadmin".to_string()).chain(words)) {
            Ok(cli) => cli,
            Err(e) => {
                out.text(&e.render().to_string())?;
                continue;
            }
        };
        if cli.config.is_some() || cli.no_seed {
            let e = ServiceError::Validation(
                "--config and --no-seed only apply when the console starts".into(),
            );
            out.error(&e.into())?;
            continue;
        }
        out.set_format(cli.output.unwrap_or(format));
        if let Err(e) = session.dispatch(cli.command, &confirmer, &mut out) {
            out.error(&e)?;
        }
    }
    Ok(())
}

/// Split on whitespace; double quotes group words, `\"` is a literal quote.
fn split_words(line: &str) -> Result<Vec<String>, ServiceError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if quoted => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err(ServiceError::Validation("unterminated quote".into()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
