//! Monky Chat is a terminal chat client with a mocked assistant.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the conversation thread, the settings
//!   dialog, static catalogs, notifications, timers and the avatar upload
//!   pipeline.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that turns key presses into [`core::app::AppAction`]s.
//! - [`cli`] parses arguments and dispatches one-shot subcommands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
