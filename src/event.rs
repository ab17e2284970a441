use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use log::debug;

use crate::app::{App, AppEvent};

const TICK_RATE: Duration = Duration::from_millis(500);

/// Polls for crossterm events and maps them to `AppEvent`s.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(AppEvent::KeyPress(KeyCode::Char('q'))));
            }
            return Ok(Some(AppEvent::KeyPress(key.code)));
        }
        return Ok(None);
    }
    Ok(Some(AppEvent::Tick))
}

/// Runs the main event loop until the app stops.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    debug!("event=loop_start view={:?} reference={}", app.view, app.reference);
    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        if let Some(event) = poll(TICK_RATE)? {
            app.update(event);
        }
    }
    debug!("event=loop_end");
    Ok(())
}
