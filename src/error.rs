use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the chapter thumbnail pipeline.
#[derive(Debug, Error)]
pub enum ChapterError {
    /// ffmpeg ran but exited unsuccessfully.
    #[error("ffmpeg error: {command:?}\n{output}")]
    CollaboratorFailure { command: String, output: String },

    /// ffmpeg could not be started at all.
    #[error("failed to run {command:?}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed field on line {line_number}: {line:?}")]
    MalformedField { line_number: usize, line: String },

    #[error("cannot create directory {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot start extraction workers")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChapterError>;
