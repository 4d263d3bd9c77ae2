// src/infra/logger.rs — Structured logging with tracing
//
// stderr gets a compact, filtered view. The optional log file gets a plain
// (no ANSI) record of every run at info level or above.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Console level for a run: `debug` when verbose, otherwise `warn`.
pub fn console_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// File level for a run: `debug` when verbose, otherwise `info`.
pub fn file_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

pub fn init_logging(verbose: bool, log_file: Option<&Path>) {
    // RUST_LOG overrides the console filter only
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level(verbose)));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(console_filter);

    let mut file_error = None;
    let file = log_file.and_then(|path| match open_log_file(path) {
        Ok(f) => Some(
            fmt::layer()
                .with_writer(Mutex::new(f))
                .with_ansi(false)
                .with_target(false)
                .with_filter(EnvFilter::new(file_level(verbose))),
        ),
        Err(e) => {
            file_error = Some((path.display().to_string(), e));
            None
        }
    });

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();

    if let Some((path, e)) = file_error {
        tracing::warn!("Could not open log file {}: {}", path, e);
    }
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(console_level(false), "warn");
        assert_eq!(console_level(true), "debug");
        assert_eq!(file_level(false), "info");
        assert_eq!(file_level(true), "debug");
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs/nested/run.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
