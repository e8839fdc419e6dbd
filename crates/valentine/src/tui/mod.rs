use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use tracing::subscriber::NoSubscriber;
use valentine_app::{PreferenceStore, TemplateGenerator, ViewContainer};
use valentine_core::{Location, SystemClock};

use crate::config::Config;

mod clipboard;
pub mod constants;
mod editor;
mod handlers;
mod terminal;
mod view;
mod widgets;

use self::constants::TUI_TICK_RATE_MS;
use self::handlers::handle_ui_action;
use self::terminal::TuiTerminal;
use self::view::Ui;

/// Launch the interactive TUI at `location`.
pub fn run<S: PreferenceStore>(store: S, config: Config, location: Location) -> Result<()> {
    let mut terminal = terminal::open()?;

    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        run_event_loop(&mut terminal, store, config, location)
    });

    // The loop's own error wins over a failed restore.
    let restored = terminal::release(&mut terminal);
    result.and(restored)
}

fn run_event_loop<S: PreferenceStore>(
    terminal: &mut TuiTerminal,
    store: S,
    config: Config,
    location: Location,
) -> Result<()> {
    let Config { app, tui } = config;
    let mut container = ViewContainer::new(store, SystemClock, app);
    container.startup(location);
    let mut ui = Ui::new(container, Box::new(TemplateGenerator), tui.keybindings);

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)? {
            let evt = event::read()?;
            if let CrosstermEvent::Key(key) = evt
                && let Some(action) = ui.handle_key(key)
                && let Err(err) = handle_ui_action(terminal, &mut ui, action)
            {
                ui.error(format!("Editor step failed: {err}"));
            }
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
