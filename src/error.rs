use std::path::PathBuf;

use thiserror::Error;

/// Failures specific to plugin discovery and removal.
#[derive(Debug, Error)]
pub enum PrmError {
    #[error("unknown format '{0}' (expected aax, au, clap, vst, vst3, driver)")]
    UnknownFormat(String),

    #[error("moving to trash is not supported on {0}")]
    TrashUnsupported(&'static str),

    #[error("opening paths is not supported on {0}")]
    OpenUnsupported(&'static str),

    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("`{command}` failed for {path:?}: {status}")]
    CommandFailed {
        command: String,
        path: PathBuf,
        status: std::process::ExitStatus,
    },
}
