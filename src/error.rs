//! Application-wide error types.
//!
//! Library modules use specific error variants via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! Per-file move failures are recoverable: the mover surfaces them as
//! [`Error::Move`] values, the caller logs them and continues with the next
//! file. Everything else ends the run.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A `--keep` value that is not a known language code
    #[error("unknown language code '{0}' (expected one of: en, jp, fr, de, it, es, pt, ru, ko, zh, multi, eu, unknown)")]
    UnknownLanguage(String),

    /// A single file could not be relocated
    #[error("failed to move {path}: {source}")]
    Move {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run log could not be written
    #[error("failed to write log {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The given collection root does not exist or is not a directory
    #[error("collection root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl Error {
    /// Create an unknown-language error.
    pub fn unknown_language(code: impl Into<String>) -> Self {
        Self::UnknownLanguage(code.into())
    }

    /// Create a per-file move error.
    pub fn move_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Move {
            path: path.into(),
            source,
        }
    }

    /// Create a log-write error.
    pub fn log_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_display() {
        let err = Error::unknown_language("klingon");
        let msg = err.to_string();
        assert!(msg.contains("klingon"));
        assert!(msg.contains("multi"));
    }

    #[test]
    fn test_move_error_names_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::move_failed("/roms/NES/game.nes", io);
        assert!(err.to_string().contains("/roms/NES/game.nes"));
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }
}
