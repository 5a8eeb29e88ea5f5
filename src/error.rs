use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while driving `pdfcrack`.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before any process was spawned.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{program} not found on PATH")]
    NotInstalled { program: String },

    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0} reader thread panicked")]
    ReaderPanicked(&'static str),

    /// The child ran to completion but reported failure.
    #[error("pdfcrack exited with code {code}: {stderr}")]
    ExitStatus { code: i32, stderr: String },

    /// The child exited cleanly without printing a recovered password.
    #[error("password not found")]
    PasswordNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
