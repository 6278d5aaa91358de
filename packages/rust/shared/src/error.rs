//! Error types for Galaxy.
//!
//! Library crates use [`GalaxyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all graph generation operations.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The content root is missing, not a directory, or unreadable.
    #[error("content root {path:?} is unusable: {message}")]
    ContentRoot { path: PathBuf, message: String },

    /// Front-matter block could not be parsed.
    #[error("front-matter error: {message}")]
    FrontMatter { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Graph serialization error.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Data validation error (dangling link endpoints, invalid graph shape, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GalaxyError>;

impl GalaxyError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a content root error for `path`.
    pub fn content_root(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::ContentRoot {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a front-matter error from any displayable message.
    pub fn front_matter(msg: impl Into<String>) -> Self {
        Self::FrontMatter {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GalaxyError::config("unknown key `roots`");
        assert_eq!(err.to_string(), "config error: unknown key `roots`");

        let err = GalaxyError::content_root("src/content", "not found");
        assert!(err.to_string().contains("src/content"));
        assert!(err.to_string().contains("not found"));

        let err = GalaxyError::validation("link target `blog/x` has no node");
        assert!(err.to_string().contains("blog/x"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = GalaxyError::io("public/galaxy-data.json", source);
        let text = err.to_string();
        assert!(text.contains("galaxy-data.json"));
        assert!(text.contains("gone"));
    }
}
