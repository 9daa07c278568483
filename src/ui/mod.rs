//! Terminal UI layer for the chat session.
//!
//! - [`chat_loop`]: the event loop that turns input into actions and runs
//!   the commands they produce.
//! - [`renderer`]: frame composition for the sidebar, thread, composer and
//!   the settings overlay.
//! - [`theme`]: colors derived from the selected chat background.
//!
//! State lives in [`crate::core`]; this layer only reads it to draw and
//! dispatches actions to change it.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
