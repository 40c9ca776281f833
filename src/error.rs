//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! `main` uses `anyhow` for convenient propagation. Most playback-facing
//! failures are deliberately swallowed at the seam where they occur
//! (logged, then degraded to a no-op or placeholder); the variants here
//! cover the paths that still need to travel as values.

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Media engine error
    #[error("Engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Create an engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = Error::engine("mpv init: failed");
        assert_eq!(err.to_string(), "Engine error: mpv init: failed");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(err.to_string().contains("gone"));
    }
}
