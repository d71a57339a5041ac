//! Async event pump for the TUI.
//!
//! The [`EventHandler`] multiplexes three sources with a biased
//! `tokio::select!`: a shutdown signal, a tick interval driving animations
//! and the deferred-action scheduler, and polled terminal input. Everything
//! is forwarded to the main loop as [`TuiEvent`]s over an MPSC channel;
//! state only ever changes there, on the UI task.
//!
//! Mouse events are forwarded because the modal overlay's click-outside
//! dismissal needs them.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use tokio::sync::{mpsc, oneshot};

/// Poll timeout for checking terminal input.
const POLL_TIMEOUT_MS: u64 = 10;

/// Events that drive the main loop.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick for animations and deferred actions.
    Tick,
    /// Terminal key input.
    Key(KeyEvent),
    /// Terminal mouse input.
    Mouse(MouseEvent),
    /// Terminal resize to `(columns, rows)`.
    Resize(u16, u16),
}

/// Pumps terminal input and tick events into the main loop.
#[derive(Debug)]
pub struct EventHandler {
    event_tx: mpsc::Sender<TuiEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a handler sending into `event_tx` until `shutdown_rx` fires.
    pub fn new(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate,
        }
    }

    /// Runs the pump until shutdown or until the receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when the blocking poll task panics.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    tracing::debug!("event handler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        tracing::debug!("event receiver dropped, exiting event loop");
                        break;
                    }
                }

                result = async {
                    tokio::time::sleep(Duration::from_millis(POLL_TIMEOUT_MS)).await;
                    tokio::task::spawn_blocking(|| {
                        poll_terminal_event(Duration::from_millis(POLL_TIMEOUT_MS))
                    }).await
                } => {
                    match result {
                        Ok(Some(event)) => {
                            if self.event_tx.send(event).await.is_err() {
                                tracing::debug!("event receiver dropped, exiting event loop");
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(join_error) => {
                            tracing::error!("terminal polling task panicked: {join_error}");
                            return Err(std::io::Error::other("terminal polling task panicked"));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Polls for one terminal event; non-terminal environments yield `None`.
fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(crossterm_event) => convert_crossterm_event(crossterm_event),
            Err(err) => {
                tracing::trace!("failed to read terminal event: {err}");
                None
            }
        },
        Ok(false) => None,
        Err(err) => {
            tracing::trace!("failed to poll terminal: {err}");
            None
        }
    }
}

fn convert_crossterm_event(event: CrosstermEvent) -> Option<TuiEvent> {
    match event {
        CrosstermEvent::Key(key_event) => Some(TuiEvent::Key(key_event)),
        CrosstermEvent::Mouse(mouse_event) => Some(TuiEvent::Mouse(mouse_event)),
        CrosstermEvent::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
        CrosstermEvent::Paste(_) => None,
    }
}
