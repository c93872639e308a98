//! Parameter control from standard input.
//!
//! Each line is one command:
//!
//! - `alpha 0.02` or `alpha=0.02` sets a parameter
//! - `alpha=0.02&pitch=110` sets several at once
//! - `show` logs the current parameters
//! - `quit` stops the stream

use crate::app::audio::StopHandle;
use crate::app::params::ParamStore;
use crate::error::AppError;
use crate::prelude::*;
use log::{debug, info, warn};
use std::io::{self, BufRead};
use std::thread::JoinHandle;

/// A parsed console line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand<'a> {
    Set { name: &'a str, value: &'a str },
    Form(&'a str),
    Show,
    Help,
    Quit,
    Empty,
    Invalid(&'a str),
}

pub fn parse_line(line: &str) -> ConsoleCommand<'_> {
    let line = line.trim();

    if line.is_empty() {
        return ConsoleCommand::Empty;
    }

    match line.to_ascii_lowercase().as_str() {
        "show" | "status" => return ConsoleCommand::Show,
        "help" | "?" => return ConsoleCommand::Help,
        "quit" | "exit" | "q" => return ConsoleCommand::Quit,
        _ => {}
    }

    if line.contains('=') {
        return ConsoleCommand::Form(line);
    }

    let mut words = line.split_whitespace();

    match (words.next(), words.next(), words.next()) {
        (Some(name), Some(value), None) => ConsoleCommand::Set { name, value },
        _ => ConsoleCommand::Invalid(line),
    }
}

/// Runs one console line against the store. Returns `false` once the
/// console should stop reading.
pub fn handle_line(line: &str, params: &ParamStore, stop: &StopHandle) -> bool {
    match parse_line(line) {
        ConsoleCommand::Set { name, value } => {
            match params.set_from_str(name, value) {
                Ok(_) => info!("now: {}", params.snapshot()),
                Err(e) => warn!("ignoring \"{}\": {e}", line.trim()),
            }
        }
        ConsoleCommand::Form(form) => {
            if !params.apply_form(form).is_empty() {
                info!("now: {}", params.snapshot());
            }
        }
        ConsoleCommand::Show => info!("{}", params.snapshot()),
        ConsoleCommand::Help => {
            info!("commands: <alpha|pitch|volume> <value>, name=value[&name=value], show, quit");
        }
        ConsoleCommand::Quit => {
            info!("stopping");
            stop.stop();
            return false;
        }
        ConsoleCommand::Empty => {}
        ConsoleCommand::Invalid(line) => {
            warn!("unrecognised command \"{line}\" (try \"help\")");
        }
    }

    true
}

/// Reads commands from stdin on a background thread until `quit`, end of
/// input, or a stop.
///
/// The thread blocks on stdin and is left detached.
///
/// # Errors
///
/// Returns an error if the thread could not be spawned.
pub fn spawn(params: ParamStoreRef, stop: StopHandle) -> Result<JoinHandle<()>, AppError> {
    std::thread::Builder::new()
        .name(String::from("murmur-console"))
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };

                if stop.is_stopped() || !handle_line(&line, &params, &stop) {
                    break;
                }
            }

            debug!("console closed");
        })
        .map_err(AppError::Console)
}
