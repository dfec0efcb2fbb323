//! Terminal operator adapter.
//!
//! Reads operator commands from stdin on a dedicated thread and forwards
//! them to the control loop over the operator channel.  End of input is
//! treated as `quit`.
//!
//! | Input                  | Command                           |
//! |------------------------|-----------------------------------|
//! | `dismiss`, `d`         | `Dismiss`                         |
//! | `emergency`            | `ManualEmergency` (after `y/N`)   |
//! | `fan on`, `fan off`    | `Actuator(FanOn / FanOff)`        |
//! | `doors open/close`     | `Actuator(DoorsOpen / DoorsClose)`|
//! | `history`, `log`       | `RefreshHistory / RefreshAlertLog`|
//! | `quit`, `q`            | `Quit`                            |

use std::fmt;
use std::io::{self, BufRead, Write};
use std::thread::JoinHandle;

use log::{info, warn};

use crate::app::commands::OperatorCommand;
use crate::model::ActuatorCommand;
use crate::runtime::channels::OperatorChannel;

const HELP: &str = "commands: dismiss | emergency | fan on|off | doors open|close | history | log | quit";

/// Result of parsing one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(OperatorCommand),
    /// Must be confirmed before it is sent.
    Confirm(OperatorCommand),
    Help,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command `{}`", self.0)
    }
}

pub fn parse_line(line: &str) -> Result<Input, UnknownCommand> {
    let lowered = line.to_ascii_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let input = match words.as_slice() {
        [] => Input::Empty,
        ["help" | "h" | "?"] => Input::Help,
        ["dismiss" | "d"] => Input::Command(OperatorCommand::Dismiss),
        ["emergency" | "e"] => Input::Confirm(OperatorCommand::ManualEmergency),
        ["fan", "on"] => Input::Command(OperatorCommand::Actuator(ActuatorCommand::FanOn)),
        ["fan", "off"] => Input::Command(OperatorCommand::Actuator(ActuatorCommand::FanOff)),
        ["doors", "open"] => Input::Command(OperatorCommand::Actuator(ActuatorCommand::DoorsOpen)),
        ["doors", "close"] => {
            Input::Command(OperatorCommand::Actuator(ActuatorCommand::DoorsClose))
        }
        ["history"] => Input::Command(OperatorCommand::RefreshHistory),
        ["log"] => Input::Command(OperatorCommand::RefreshAlertLog),
        ["quit" | "q" | "exit"] => Input::Command(OperatorCommand::Quit),
        _ => return Err(UnknownCommand(line.trim().to_string())),
    };
    Ok(input)
}

/// `y`/`yes` (or `s`/`si`) confirms; anything else declines.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "s" | "si"
    )
}

/// Drive the prompt loop over any reader/writer until `quit` or EOF.
pub fn read_commands<R, W, F>(mut input: R, mut out: W, mut forward: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(OperatorCommand),
{
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            forward(OperatorCommand::Quit);
            return Ok(());
        }

        let command = match parse_line(&line) {
            Ok(Input::Command(cmd)) => cmd,
            Ok(Input::Confirm(cmd)) => {
                write!(out, "Activate the emergency protocol? (fan on, doors open) [y/N] ")?;
                out.flush()?;
                let mut answer = String::new();
                input.read_line(&mut answer)?;
                if !is_confirmation(&answer) {
                    writeln!(out, "Cancelled.")?;
                    continue;
                }
                cmd
            }
            Ok(Input::Help) => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Ok(Input::Empty) => continue,
            Err(e) => {
                writeln!(out, "{e}; {HELP}")?;
                continue;
            }
        };

        forward(command);
        if command == OperatorCommand::Quit {
            return Ok(());
        }
    }
}

// ── Thread spawn ─────────────────────────────────────────────

/// Spawn the stdin reader thread.
pub fn spawn(operator: &'static OperatorChannel) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("operator".into())
        .spawn(move || {
            info!("Operator: {HELP}");
            let stdin = io::stdin();
            let result = read_commands(stdin.lock(), io::stderr(), |cmd| {
                futures_lite::future::block_on(operator.send(cmd));
            });
            if let Err(e) = result {
                warn!("Operator: input closed ({e}), quitting");
                futures_lite::future::block_on(operator.send(OperatorCommand::Quit));
            }
        })
}
