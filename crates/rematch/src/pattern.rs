//! Pattern compilation against the PCRE2 engine.

use pcre2::bytes::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Compile-time engine options, passed through to PCRE2 unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Case-insensitive matching.
    pub caseless: bool,
    /// `^` and `$` match at line boundaries, not just subject boundaries.
    pub multi_line: bool,
    /// `.` also matches newline.
    pub dotall: bool,
    /// Unescaped whitespace and `#` comments in the pattern are ignored.
    pub extended: bool,
    /// Treat CRLF as the newline sequence.
    pub crlf: bool,
    /// Unicode property support for `\w`, `\d` and friends.
    pub ucp: bool,
    /// Validate pattern and subjects as UTF-8.
    pub utf: bool,
    /// Use the engine's JIT when the platform supports it.
    pub jit: bool,
}

/// A compiled pattern, reusable across sessions.
///
/// The handle exclusively owns the compiled form; the pattern text is not
/// retained. Cloning is cheap (the compiled code is reference counted
/// inside the engine binding) and a handle is read-only after
/// construction, so clones can be shared across threads.
#[derive(Clone, Debug)]
pub struct PatternHandle {
    regex: Regex,
}

impl PatternHandle {
    /// Compile `pattern` with the given options.
    ///
    /// A malformed pattern is a recoverable [`Error::Compile`] carrying
    /// the engine's failure offset and message, so callers can reject the
    /// input or retry with a different pattern.
    pub fn compile(pattern: &str, options: &CompileOptions) -> Result<Self> {
        let regex = RegexBuilder::new()
            .caseless(options.caseless)
            .multi_line(options.multi_line)
            .dotall(options.dotall)
            .extended(options.extended)
            .crlf(options.crlf)
            .ucp(options.ucp)
            .utf(options.utf)
            .jit_if_available(options.jit)
            .build(pattern)
            .map_err(|e| Error::compile(&e))?;

        let handle = Self { regex };
        tracing::debug!("compiled pattern with {} capture slots", handle.capture_slots());
        Ok(handle)
    }

    /// Capture slots per match: the whole match plus one per group.
    pub fn capture_slots(&self) -> usize {
        self.regex.capture_locations().len()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
