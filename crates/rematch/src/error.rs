//! Error types for pattern compilation, match execution, and result access.

/// Rematch error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Pattern rejected by the engine at compile time.
    #[error("invalid pattern: {message}")]
    Compile {
        /// Byte offset into the pattern where compilation failed.
        offset: usize,
        message: String,
    },

    /// Unexpected engine failure during a match attempt.
    ///
    /// Distinct from "no match", which is an ordinary outcome. The
    /// session clears its stored state before surfacing this.
    #[error("match engine failure: {source}")]
    Engine {
        #[source]
        source: pcre2::Error,
    },

    /// Match index outside the stored result set.
    #[error("match index {index} out of range ({count} matches stored)")]
    BadMatchIndex { index: usize, count: usize },

    /// Capture index outside a match's capture slots.
    #[error("capture index {index} out of range ({count} capture slots)")]
    BadCaptureIndex { index: usize, count: usize },
}

/// Result type using rematch Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a compile-time rejection, keeping the engine's failure offset.
    pub(crate) fn compile(err: &pcre2::Error) -> Self {
        Error::Compile {
            offset: err.offset().unwrap_or(0),
            message: err.to_string(),
        }
    }

    pub(crate) fn engine(source: pcre2::Error) -> Self {
        Error::Engine { source }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
