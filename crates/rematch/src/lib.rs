//! Stateful match sessions over PCRE2-compiled patterns.
//!
//! A [`PatternHandle`] owns the compiled form of a pattern; a
//! [`MatchSession`] drives repeated match operations against subject
//! strings, retains a bounded set of capture-span results, and exposes
//! bounds-checked accessors for reading them back out.

pub mod error;
pub mod pattern;
pub mod session;

pub use error::{Error, Result};
pub use pattern::{CompileOptions, PatternHandle};
pub use session::{
    CaptureSpan, DEFAULT_MAX_MATCHES, Endpoint, MatchOutcome, MatchRecord, MatchSession,
};
