//! Main chat event loop and UI rendering
//!
//! The loop owns the terminal and the action queue. Key presses and finished
//! background tasks both arrive as [`AppAction`](crate::core::app::AppAction)s;
//! applying them may yield commands, which run as Tokio tasks in
//! [`executors`].

mod event_loop;
pub mod executors;
pub mod keybindings;
pub mod lifecycle;
mod setup;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::app::App;

pub use event_loop::run_chat;
pub use setup::bootstrap_app;

/// Shared handle to the session state for the loop and its tasks.
#[derive(Clone)]
pub struct AppHandle {
    inner: Arc<Mutex<App>>,
}

impl AppHandle {
    pub fn new(app: App) -> Self {
        Self {
            inner: Arc::new(Mutex::new(app)),
        }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&App) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}
