//! Interactive approval console (`wfadmin console`).
//!
//! The event loop redraws from a fresh snapshot on every tick. Reloads and
//! approve/reject run as spawned tasks, so the screen keeps updating (and
//! shows the in-flight indicator) while a request is outstanding.

pub mod app;
pub mod input;
pub mod render;

use crate::console::WorkflowApprovalList;
use crate::tui::app::{App, Effect};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(150);

type ConsoleTerminal = Terminal<CrosstermBackend<Stdout>>;

pub fn setup_terminal() -> Result<ConsoleTerminal> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = terminal::disable_raw_mode();
        return Err(e.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(console) => Ok(console),
        Err(e) => {
            let _ = terminal::disable_raw_mode();
            let mut out = io::stdout();
            let _ = execute!(out, LeaveAlternateScreen);
            Err(e.into())
        }
    }
}

pub fn restore_terminal(terminal: &mut ConsoleTerminal) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Calls `restore` exactly once: through `finish`, or on drop, which also
/// covers unwinding out of a panic.
struct RestoreGuard<T, F>
where
    F: FnMut(&mut T) -> Result<()>,
{
    value: T,
    restore: F,
    restored: bool,
}

impl<T, F> RestoreGuard<T, F>
where
    F: FnMut(&mut T) -> Result<()>,
{
    fn new(value: T, restore: F) -> Self {
        Self {
            value,
            restore,
            restored: false,
        }
    }

    fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    fn finish(mut self) -> Result<()> {
        self.restored = true;
        (self.restore)(&mut self.value)
    }
}

impl<T, F> Drop for RestoreGuard<T, F>
where
    F: FnMut(&mut T) -> Result<()>,
{
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(e) = (self.restore)(&mut self.value) {
            tracing::debug!("terminal restore failed: {}", e);
        }
    }
}

/// Run the console until the user quits.
pub async fn run(mut app: App) -> Result<()> {
    let mut terminal = RestoreGuard::new(setup_terminal()?, restore_terminal);
    let result = event_loop(terminal.get_mut(), &mut app).await;
    // Restore even when the loop failed, then report the loop's error first.
    let restored = terminal.finish();
    result.and(restored)
}

async fn event_loop(terminal: &mut ConsoleTerminal, app: &mut App) -> Result<()> {
    spawn_effect(&app.list, Effect::Reload);

    while !app.should_quit {
        let snapshot = app.list.snapshot().await;
        let view = app.presenter.present(&snapshot, &app.search, Utc::now());
        app.absorb_notifications();
        app.clamp_selection(&view);

        terminal.draw(|f| render::draw(f, &*app, &view))?;

        // crossterm polling is blocking; keep it off the async workers.
        let event = tokio::task::spawn_blocking(|| -> io::Result<Option<Event>> {
            if event::poll(TICK)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })
        .await??;

        if let Some(Event::Key(key)) = event {
            if let Some(command) = input::map_key(app.mode, key) {
                if let Some(effect) = app.apply(command, &view) {
                    spawn_effect(&app.list, effect);
                }
            }
        }
    }
    Ok(())
}

fn spawn_effect(list: &Arc<WorkflowApprovalList>, effect: Effect) {
    let list = list.clone();
    tokio::spawn(async move {
        match effect {
            Effect::Reload => {
                if let Err(e) = list.reload().await {
                    tracing::debug!("reload failed: {}", e);
                }
            }
            Effect::Dispatch {
                reference_id,
                decision,
            } => {
                if let Err(e) = list.dispatch(&reference_id, decision).await {
                    tracing::debug!("{} of {} failed: {}", decision, reference_id, e);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn test_guard_restores_once_when_loop_panics() {
        let restores = Cell::new(0);
        let bump = |_: &mut ()| -> Result<()> {
            restores.set(restores.get() + 1);
            Ok(())
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = RestoreGuard::new((), bump);
            panic!("draw failed");
        }));
        assert!(outcome.is_err());
        assert_eq!(restores.get(), 1);

        RestoreGuard::new((), bump).finish().unwrap();
        assert_eq!(restores.get(), 2);
    }
}
