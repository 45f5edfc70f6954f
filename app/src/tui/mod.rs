//! Terminal front-end for the todo list.
//!
//! The loop multiplexes three sources with `tokio::select!`: keyboard events
//! from crossterm, completed service calls from the driver, and a render
//! tick. Keys become view actions via `input::handle_key`; the frame is
//! drawn from `Driver::screen` alone.

pub mod input;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use tracing::{error, info};

use crate::runtime::{Driver, Responses};
use input::Outcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Keystrokes go to the draft title.
    Editing,
}

/// Front-end state that the view does not care about.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    pub cursor: usize,
}

impl UiState {
    /// Highlighted row for a list of `len` rows, clamped to the last one.
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.cursor.min(len - 1))
        }
    }
}

/// Run the TUI until the user quits. Mounts the view on entry and tears it
/// down on exit.
pub async fn run(mut driver: Driver, mut responses: Responses) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let mut ui = UiState::default();
    let mut events = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    driver.mount();

    let result = loop {
        tokio::select! {
            action = responses.recv() => {
                driver.apply(action);
            }

            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        let screen = driver.screen();
                        match input::handle_key(key, &mut ui, &screen) {
                            Outcome::Dispatch(action) => driver.apply(action),
                            Outcome::Quit => break Ok(()),
                            Outcome::Local | Outcome::Ignored => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                let screen = driver.screen();
                if let Err(e) = terminal.draw(|frame| widgets::render_frame(frame, &screen, &ui)) {
                    break Err(e.into());
                }
            }
        }
    };

    driver.shutdown();
    ratatui::restore();
    info!("terminal restored");
    result
}
