//! Tracing subscriber setup.

use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Where diagnostic output goes for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    /// The terminal UI owns the screen and no log file was requested.
    Disabled,
}

impl LogTarget {
    pub fn for_run(log: Option<PathBuf>, interactive: bool) -> Self {
        match (log, interactive) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Disabled,
            (None, false) => LogTarget::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open `path` for appending, creating its parent directory when needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn configure_logging(target: &LogTarget) -> Result<(), Box<dyn Error>> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| err as Box<dyn Error>),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_target(false)
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err as Box<dyn Error>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn interactive_runs_without_a_log_file_stay_quiet() {
        assert_eq!(LogTarget::for_run(None, true), LogTarget::Disabled);
        assert_eq!(LogTarget::for_run(None, false), LogTarget::Stderr);
        assert_eq!(
            LogTarget::for_run(Some(PathBuf::from("x.log")), true),
            LogTarget::File(PathBuf::from("x.log"))
        );
    }

    #[test]
    fn log_file_is_created_and_appended() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("monky.log");

        let mut file = open_log_file(&path).expect("open");
        writeln!(file, "first").expect("write");
        drop(file);

        let mut file = open_log_file(&path).expect("reopen");
        writeln!(file, "second").expect("write");
        drop(file);

        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "first\nsecond\n");
    }
}
