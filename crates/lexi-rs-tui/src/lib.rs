//! Library entry point for the Lexi TUI.
//!
//! Provides a reusable [`run`] function that drives the Ratatui terminal UI
//! against a pre-built [`VocabularyList`].

mod app;
mod event;
mod ui;

pub use app::{Action, App, Mode};

use anyhow::anyhow;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use lexi_rs_core::VocabularyList;
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Configuration for a TUI session.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Display label for the active store (shown in header).
    pub store_label: String,
}

/// Launch the TUI.
///
/// The snapshot is shown immediately and the remote list is fetched in the
/// background. The caller is responsible for initializing logging; log
/// output should not go to the terminal the UI draws on.
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails.
pub async fn run(list: VocabularyList, config: TuiConfig) -> anyhow::Result<()> {
    let mut app = App::new(list, config.store_label);

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone());

    app.list.begin_load();
    spawn_remote_list(&mut app, tx.clone());

    let outcome = event_loop(&mut terminal, &mut app, &mut rx, tx).await;
    restore_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        let event = rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
        if handle_app_event(event, app, &tx).await {
            info!("exiting tui");
            return Ok(());
        }
    }
}

/// Dispatch a UI event and return true when the app should exit.
async fn handle_app_event(event: AppEvent, app: &mut App, sender: &mpsc::Sender<AppEvent>) -> bool {
    match event {
        AppEvent::Input(key) => {
            let action = app.handle_key(key);
            run_action(action, app, sender).await
        }
        AppEvent::Tick => {
            app.list.expire_toast(Instant::now());
            false
        }
        AppEvent::RemoteLoaded(result) => {
            app.remote_pending = false;
            app.list.apply_remote(result);
            false
        }
    }
}

async fn run_action(action: Action, app: &mut App, sender: &mpsc::Sender<AppEvent>) -> bool {
    match action {
        Action::None => false,
        Action::Quit => true,
        Action::Reload => {
            app.list.begin_load();
            spawn_remote_list(app, sender.clone());
            false
        }
        Action::Delete(id) => {
            if let Err(err) = app.list.delete_entry(&id).await {
                warn!("delete failed (id={id}, error={err})");
            }
            false
        }
        Action::Submit => {
            match app.list.create_entry(&mut app.draft).await {
                Ok(entry) => {
                    debug!("entry added from form (id={})", entry.id);
                    app.mode = Mode::Table;
                }
                Err(err) => debug!("form submit rejected (error={err})"),
            }
            false
        }
    }
}

/// Fetch the remote list on a background task.
///
/// The result is dropped if the UI has already exited.
fn spawn_remote_list(app: &mut App, sender: mpsc::Sender<AppEvent>) {
    let store = app.list.store();
    app.remote_pending = true;
    tokio::spawn(async move {
        let result = store.list().await;
        if sender.send(AppEvent::RemoteLoaded(result)).await.is_err() {
            debug!("remote list finished after tui exit");
        }
    });
}

/// Spawn a background task that forwards terminal key events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    if let CrosstermEvent::Key(key) = event
                        && sender.send(AppEvent::Input(key)).await.is_err()
                    {
                        return;
                    }
                }
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Tick).await.is_err() {
                return;
            }
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
