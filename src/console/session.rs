//! Interactive console session.
//!
//! Reads commands line by line and keeps serving them while a request is
//! outstanding. Only `send` is refused until the response has been rendered.

use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::pin::Pin;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::export::export_last_response;
use crate::health::HealthSnapshot;
use crate::registry::InputKind;
use crate::transport::{OutgoingRequest, Transport};

use super::command::{parse_command, Command, HELP};
use super::controller::{ConsoleController, SendOutcome};
use super::state::ConsoleState;
use super::view::{render_connectivity, render_endpoint_list, render_form, render_response};

type PendingSend<'c> = Pin<Box<dyn Future<Output = SendOutcome> + 'c>>;

enum Step {
    Continue,
    Dispatch(OutgoingRequest),
    Quit,
}

/// One interactive session over a controller.
pub struct Session<'c, 'r, T> {
    console: &'c ConsoleController<'r, T>,
    state: ConsoleState,
    health: watch::Receiver<HealthSnapshot>,
    export_dir: PathBuf,
}

impl<'c, 'r, T: Transport> Session<'c, 'r, T> {
    /// Start on the console's default endpoint.
    pub fn new(
        console: &'c ConsoleController<'r, T>,
        health: watch::Receiver<HealthSnapshot>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            console,
            state: console.initial_state(),
            health,
            export_dir,
        }
    }

    /// Current console state.
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// Serve commands from `input` until `quit`, end of input or `shutdown`.
    ///
    /// At end of input an outstanding send is still awaited and rendered.
    /// `shutdown` ends the session immediately, dropping any pending send.
    pub async fn run<R, W, S>(&mut self, input: R, out: &mut W, shutdown: S) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        S: Future<Output = ()>,
    {
        let console = self.console;
        let mut lines = input.lines();
        let mut pending: Option<PendingSend<'c>> = None;
        let mut input_open = true;
        tokio::pin!(shutdown);

        writeln!(out, "Game API console - {}", console.base())?;
        writeln!(out, "Type 'help' for commands.\n")?;
        write!(out, "{}", render_endpoint_list(console.registry(), self.state.selected()))?;
        writeln!(out)?;
        write!(out, "{}", render_form(&self.state))?;
        prompt(out)?;

        while input_open || pending.is_some() {
            tokio::select! {
                outcome = settle(&mut pending) => {
                    pending = None;
                    console.finish_send(&mut self.state, outcome);
                    write!(out, "\n{}", render_response(&self.state))?;
                    if input_open {
                        prompt(out)?;
                    }
                }
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        continue;
                    };
                    match self.apply(&line, out)? {
                        Step::Continue => {}
                        Step::Dispatch(request) => {
                            pending = Some(Box::pin(console.dispatch(request)));
                        }
                        Step::Quit => break,
                    }
                    prompt(out)?;
                }
                _ = &mut shutdown => {
                    info!("Console interrupted");
                    break;
                }
            }
        }

        if pending.is_some() {
            debug!("Abandoning outstanding request");
        }
        Ok(())
    }

    fn apply<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Step> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Step::Continue);
            }
        };

        let console = self.console;
        let state = &mut self.state;

        match command {
            Command::Empty => {}
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Step::Quit),
            Command::List => write!(out, "{}", render_endpoint_list(console.registry(), state.selected()))?,
            Command::Show => {
                write!(out, "{}", render_form(state))?;
                write!(out, "{}", render_response(state))?;
            }
            Command::Use { key } => match console.select_endpoint(state, &key) {
                Ok(()) => write!(out, "{}", render_form(state))?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Set { name, value } => {
                let multi_line = state
                    .form()
                    .field(&name)
                    .is_some_and(|f| f.input == InputKind::MultiLine);
                let value = if multi_line {
                    value.replace("\\n", "\n")
                } else {
                    value
                };
                if let Err(e) = state.set_param(&name, value) {
                    writeln!(out, "{}", e)?;
                }
            }
            Command::Body { text } => {
                if let Err(e) = state.set_body(text) {
                    writeln!(out, "{}", e)?;
                }
            }
            Command::Send => match console.begin_send(state) {
                Ok(Some(request)) => {
                    writeln!(out, "[{}]", state.trigger())?;
                    return Ok(Step::Dispatch(request));
                }
                Ok(None) => write!(out, "{}", render_response(state))?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Status => writeln!(out, "{}", render_connectivity(&self.health.borrow()))?,
            Command::Export { path } => {
                match export_last_response(state, path.as_deref(), &self.export_dir) {
                    Ok(path) => writeln!(out, "Saved response to {}", path.display())?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
        }

        Ok(Step::Continue)
    }
}

async fn settle(pending: &mut Option<PendingSend<'_>>) -> SendOutcome {
    match pending {
        Some(send) => send.await,
        None => std::future::pending().await,
    }
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
