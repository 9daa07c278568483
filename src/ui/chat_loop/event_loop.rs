//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input is read on a dedicated task and resolved against the
//! current [`UiMode`](crate::core::app::UiMode). Resulting actions go through
//! the same queue as completions from background tasks, so state changes
//! happen in one place and in arrival order.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::app::{apply_actions, AppAction, AppActionDispatcher};
use crate::core::config::Config;
use crate::ui::renderer::ui;

use super::executors::execute_command;
use super::keybindings::{resolve_key, resolve_paste, KeyResult};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::setup::bootstrap_app;
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

async fn is_exit_requested(app: &AppHandle) -> bool {
    app.read(|app| app.ui.exit_requested).await
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    (app.update(|app| terminal_guard.draw(|f| ui(f, app))).await)?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

#[derive(Debug, Default)]
struct EventProcessingOutcome {
    events_processed: bool,
    exit_requested: bool,
}

async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome::default();

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                match app.read(|app| resolve_key(app, &key)).await {
                    KeyResult::Actions(actions) => dispatcher.dispatch_many(actions),
                    KeyResult::Exit => {
                        dispatcher.dispatch(AppAction::Quit);
                        outcome.exit_requested = true;
                        break;
                    }
                    KeyResult::NotHandled => {}
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                if let Some(action) = app.read(|app| resolve_paste(app, &text)).await {
                    dispatcher.dispatch(action);
                }
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    outcome
}

/// Apply every queued action, then start the commands they produced.
async fn drain_action_queue(
    app: &AppHandle,
    dispatcher: &AppActionDispatcher,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    for cmd in commands {
        debug!(command = ?cmd, "Starting background command");
        execute_command(dispatcher.clone(), cmd);
    }
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Whether something on screen animates or expires without input.
async fn has_live_elements(app: &AppHandle) -> bool {
    app.update(|app| {
        let expired = app.ui.notifications.expire(Instant::now());
        expired
            || app.conversation.pending_replies > 0
            || app.conversation.is_recording()
            || app.settings.is_uploading
    })
    .await
}

pub async fn run_chat(config: Config) -> Result<(), Box<dyn Error>> {
    let app = bootstrap_app(&config)?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);

    let terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    const MAX_FPS: u64 = 30;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if is_exit_requested(&app).await {
            break 'main_loop Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break 'main_loop Err(err.into());
        }

        let term_size = current_terminal_size(&terminal).await;
        app.update(|app| {
            app.ui.last_term_size = term_size;
        })
        .await;

        let event_outcome = process_ui_events(&app, &mut event_rx, &action_dispatcher).await;
        if event_outcome.events_processed {
            request_redraw = true;
        }

        let actions_applied =
            drain_action_queue(&app, &action_dispatcher, &mut action_rx).await;
        if actions_applied {
            request_redraw = true;
        }

        if event_outcome.exit_requested {
            break 'main_loop Ok(());
        }

        if has_live_elements(&app).await {
            request_redraw = true;
        }

        let idle = !event_outcome.events_processed && !actions_applied;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    info!("Session ended");

    result
}
