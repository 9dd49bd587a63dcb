//! Headless frontend: commands from stdin, events and status to stdout.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use echoes_core::Direction;
use echoes_runtime::{RuntimeError, RuntimeHandle};

use crate::input::{HELP, LineCommand, parse_line};
use crate::status::{event_message, status_line};

pub struct CliApp {
    handle: RuntimeHandle,
    /// `None` when the runtime only ticks on request.
    tick_period: Option<Duration>,
}

impl CliApp {
    pub fn new(handle: RuntimeHandle, tick_period: Option<Duration>) -> Self {
        Self {
            handle,
            tick_period,
        }
    }

    /// Runs until `quit`, end of input, or runtime shutdown.
    pub async fn run(self) -> Result<()> {
        let mut events = self.handle.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{HELP}");
        self.print_status().await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("stdin closed");
                        break;
                    };
                    if !self.handle_line(&line).await? {
                        break;
                    }
                }
                event = events.recv() => match event {
                    Ok(event) => {
                        if let Some(message) = event_message(&event) {
                            println!("{message}");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                    Err(RecvError::Closed) => break,
                },
            }
        }

        Ok(())
    }

    /// Returns `false` when the user asked to quit.
    async fn handle_line(&self, line: &str) -> Result<bool> {
        match parse_line(line) {
            LineCommand::Quit => return Ok(false),
            LineCommand::Help => println!("{HELP}"),
            LineCommand::Status => self.print_status().await?,
            LineCommand::Move { direction, steps } => self.walk(direction, steps).await?,
            LineCommand::Hold(direction) => self.handle.hold(direction).await?,
            LineCommand::Interact => {
                self.handle.send_input(None, true).await?;
                self.step_if_manual().await?;
            }
            LineCommand::Pause => self.handle.pause().await?,
            LineCommand::Resume => self.handle.resume().await?,
            LineCommand::Continue => {
                let phase = self.handle.continue_after_completion().await?;
                debug!(%phase, "continued");
                self.step_if_manual().await?;
                self.print_status().await?;
            }
            LineCommand::Restart(scope) => {
                self.handle.restart(scope).await?;
                self.step_if_manual().await?;
                self.print_status().await?;
            }
            LineCommand::SelectLevel(index) => match self.handle.select_level(index).await {
                Ok(()) => {
                    self.step_if_manual().await?;
                    self.print_status().await?;
                }
                Err(error) if error.is_recoverable() => println!("{error}"),
                Err(error) => return Err(error.into()),
            },
            LineCommand::None => {}
            LineCommand::Unknown(text) => println!("unknown command: {text} (try help)"),
        }
        Ok(true)
    }

    /// Moves for `steps` ticks: explicit steps in manual mode, a timed hold otherwise.
    async fn walk(&self, direction: Direction, steps: u32) -> Result<(), RuntimeError> {
        match self.tick_period {
            None => {
                for _ in 0..steps {
                    self.handle.send_input(Some(direction), false).await?;
                    self.handle.step().await?;
                }
            }
            Some(period) => {
                self.handle.hold(Some(direction)).await?;
                tokio::time::sleep(period * steps).await;
                self.handle.hold(None).await?;
            }
        }
        Ok(())
    }

    async fn step_if_manual(&self) -> Result<(), RuntimeError> {
        if self.tick_period.is_none() {
            self.handle.step().await?;
        }
        Ok(())
    }

    async fn print_status(&self) -> Result<(), RuntimeError> {
        let snapshot = self.handle.snapshot().await?;
        println!("{}", status_line(&snapshot));
        Ok(())
    }
}
