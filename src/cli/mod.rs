//! Command-line interface parsing and handling
//!
//! Parses arguments, sets up tracing and runs the chosen subcommand. With no
//! subcommand the terminal chat UI starts.

pub mod catalog_list;
pub mod config_edit;
pub mod upload;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::catalog_list::{list_backgrounds, list_templates};
use crate::cli::config_edit::{set_config_value, unset_config_value};
use crate::cli::upload::upload_avatar;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{configure_logging, LogTarget};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "monky-chat", version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat client with a demo assistant")]
#[command(
    long_about = "MonkyAI Chat is a full-screen terminal chat interface. Replies come from a \
built-in demo assistant; the only network call uploads your avatar image.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Ctrl+T            Open or close quick-reply templates\n\
  Ctrl+R            Start or stop voice input\n\
  Ctrl+N            Start a new chat\n\
  Ctrl+S            Open settings (name, avatar, background)\n\
  PageUp/PageDown   Scroll the thread\n\
  Esc               Close the current panel\n\
  Ctrl+C            Quit the application\n\n\
Environment:\n\
  RUST_LOG          Log filter (default: info); logs go to --log during the UI"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Upload an image as your avatar and print its URL
    Upload {
        /// Image file to upload
        file: PathBuf,
    },
    /// List the available chat backgrounds
    Backgrounds,
    /// List the quick-reply templates
    Templates,
    /// Set a configuration value
    Set {
        /// One of: user-name, upload-endpoint, reply-delay-ms, voice-delay-ms,
        /// voice-cancel-on-toggle
        key: String,
        /// Value to store
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Remove a configuration value, restoring its default
    Unset {
        /// Configuration key to clear
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    let interactive = matches!(command, Commands::Chat);
    configure_logging(&LogTarget::for_run(args.log, interactive))?;
    debug!(version = LONG_VERSION, "Starting");

    match command {
        Commands::Chat => {
            let config = Config::load()?;
            run_chat(config).await
        }
        Commands::Upload { file } => {
            let config = Config::load()?;
            let url = upload_avatar(&config, file).await?;
            println!("{url}");
            Ok(())
        }
        Commands::Backgrounds => {
            print!("{}", list_backgrounds());
            Ok(())
        }
        Commands::Templates => {
            print!("{}", list_templates());
            Ok(())
        }
        Commands::Set { key, value } => {
            let path = Config::get_config_path()?;
            let message = set_config_value(&path, &key, &value)?;
            println!("✅ {message}");
            Ok(())
        }
        Commands::Unset { key } => {
            let path = Config::get_config_path()?;
            let message = unset_config_value(&path, &key)?;
            println!("✅ {message}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
