// src/infra/paths.rs — Config and log file locations
//
// PROMPT_ENHANCER_HOME overrides everything. When unset, files live under
// ~/.prompt-enhancer/.

use std::path::PathBuf;

/// Returns the PROMPT_ENHANCER_HOME override, if set.
fn home_override() -> Option<PathBuf> {
    std::env::var_os("PROMPT_ENHANCER_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Home directory, or the working directory when none can be determined.
fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Base directory: $PROMPT_ENHANCER_HOME/ or ~/.prompt-enhancer/
pub fn config_dir() -> PathBuf {
    if let Some(home) = home_override() {
        return home;
    }
    dirs_home().join(".prompt-enhancer")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn log_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Default log file path
pub fn log_file_path() -> PathBuf {
    log_dir().join("prompt-enhancer.log")
}
