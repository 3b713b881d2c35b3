// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Match sessions: the match loop, bounded result storage, and capture
//! extraction.
//!
//! A session owns one compiled pattern, a copy of the most recently
//! matched subject, and up to [`MatchSession::max_matches`] match
//! records. Every match operation replaces the stored subject and
//! records wholesale, so accessors always read spans against the subject
//! that produced them.

use pcre2::bytes::CaptureLocations;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pattern::{CompileOptions, PatternHandle};

/// Default bound on stored matches per `match_all` call.
pub const DEFAULT_MAX_MATCHES: usize = 20;

/// A half-open byte span into the session's subject copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureSpan {
    /// Byte offset where the capture starts.
    pub start: usize,
    /// Byte offset one past the capture's last byte.
    pub end: usize,
}

impl CaptureSpan {
    /// Span length in bytes. Zero for a zero-width match.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Capture spans produced by one successful match attempt.
///
/// Slot 0 is the whole match; slots 1.. are capture groups in engine
/// numbering (left-to-right by opening parenthesis). A group that did
/// not participate in the match has no span.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    full: CaptureSpan,
    groups: Vec<Option<CaptureSpan>>,
}

impl MatchRecord {
    fn from_locations(start: usize, end: usize, locs: &CaptureLocations) -> Self {
        let groups = (1..locs.len())
            .map(|i| locs.get(i).map(|(s, e)| CaptureSpan { start: s, end: e }))
            .collect();
        Self {
            full: CaptureSpan { start, end },
            groups,
        }
    }

    /// Number of capture slots, the whole match included.
    pub fn capture_count(&self) -> usize {
        self.groups.len() + 1
    }

    /// The whole-match span.
    pub fn full_span(&self) -> CaptureSpan {
        self.full
    }

    /// Span for a capture slot: `None` past the last slot, `Some(None)`
    /// for a group that did not participate.
    fn span(&self, capture_index: usize) -> Option<Option<CaptureSpan>> {
        if capture_index == 0 {
            Some(Some(self.full))
        } else {
            self.groups.get(capture_index - 1).copied()
        }
    }
}

/// Outcome of a match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The engine found no match; the session stores no records.
    NoMatch,
    /// Matches were stored. For [`MatchSession::match_once`] the payload
    /// is the capture slot count of the single record; for
    /// [`MatchSession::match_all`] it is the number of stored matches.
    Matched(usize),
}

/// Which end of a whole-match span to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// A stateful match session over one compiled pattern.
///
/// Mutating operations take `&mut self`, so a session cannot be driven
/// from two threads at once; share the [`PatternHandle`] and give each
/// thread its own session instead.
pub struct MatchSession {
    pattern: PatternHandle,
    /// Owned copy of the most recently matched subject.
    subject: Vec<u8>,
    /// Stored records, bounded by `max_matches`.
    records: Vec<MatchRecord>,
    max_matches: usize,
}

impl MatchSession {
    /// Create a session with the default match bound.
    pub fn new(pattern: PatternHandle) -> Self {
        Self::with_capacity(pattern, DEFAULT_MAX_MATCHES)
    }

    /// Create a session storing at most `max_matches` matches per
    /// `match_all` call. The bound is a stop condition, not an error:
    /// the session reports however many matches it stored.
    pub fn with_capacity(pattern: PatternHandle, max_matches: usize) -> Self {
        Self {
            pattern,
            subject: Vec::new(),
            records: Vec::new(),
            max_matches,
        }
    }

    /// Compile `pattern` and create a session for it in one step.
    pub fn compile(pattern: &str, options: &CompileOptions) -> Result<Self> {
        Ok(Self::new(PatternHandle::compile(pattern, options)?))
    }

    /// The compiled pattern driving this session.
    pub fn pattern(&self) -> &PatternHandle {
        &self.pattern
    }

    /// The session's stored-match bound.
    pub fn max_matches(&self) -> usize {
        self.max_matches
    }

    /// Number of matches currently stored.
    pub fn match_count(&self) -> usize {
        self.records.len()
    }

    /// The retained copy of the most recently matched subject.
    pub fn subject(&self) -> &[u8] {
        &self.subject
    }

    /// Run a single match attempt against `subject`, starting at byte
    /// offset `start`.
    ///
    /// Prior results are discarded first. A `start` past the end of the
    /// subject degrades to [`MatchOutcome::NoMatch`] without invoking the
    /// engine. On success exactly one record is stored and the outcome
    /// carries its capture slot count.
    pub fn match_once(&mut self, subject: &[u8], start: usize) -> Result<MatchOutcome> {
        tracing::trace!("match_once from offset {}", start);
        self.begin(subject);
        if start > self.subject.len() {
            return Ok(MatchOutcome::NoMatch);
        }

        let mut locs = self.pattern.regex().capture_locations();
        match self.pattern.regex().captures_read_at(&mut locs, &self.subject, start) {
            Ok(Some(m)) => {
                let record = MatchRecord::from_locations(m.start(), m.end(), &locs);
                let captures = record.capture_count();
                self.records.push(record);
                Ok(MatchOutcome::Matched(captures))
            }
            Ok(None) => Ok(MatchOutcome::NoMatch),
            Err(e) => {
                self.reset();
                Err(Error::engine(e))
            }
        }
    }

    /// Find successive non-overlapping matches in `subject`, storing each
    /// one, until the match bound is reached, the cursor passes the end
    /// of the subject, or the engine reports no further match.
    ///
    /// Prior results are discarded first. An engine failure clears all
    /// stored state before the error is returned.
    pub fn match_all(&mut self, subject: &[u8]) -> Result<MatchOutcome> {
        tracing::trace!("match_all over {} bytes", subject.len());
        self.begin(subject);

        let mut locs = self.pattern.regex().capture_locations();
        let mut cursor = 0;
        while self.records.len() < self.max_matches && cursor < self.subject.len() {
            let found = self
                .pattern
                .regex()
                .captures_read_at(&mut locs, &self.subject, cursor);
            let (start, end) = match found {
                Ok(Some(m)) => (m.start(), m.end()),
                Ok(None) => break,
                Err(e) => {
                    self.reset();
                    return Err(Error::engine(e));
                }
            };

            self.records.push(MatchRecord::from_locations(start, end, &locs));
            // A zero-width match leaves the cursor on its own start
            // offset; step one byte past it so the loop terminates.
            cursor = if end == start { end + 1 } else { end };
        }

        if self.records.len() == self.max_matches {
            tracing::debug!("match bound {} reached, stopping", self.max_matches);
        }

        if self.records.is_empty() {
            Ok(MatchOutcome::NoMatch)
        } else {
            Ok(MatchOutcome::Matched(self.records.len()))
        }
    }

    /// Number of capture slots stored for a match, the whole match
    /// included.
    pub fn capture_count(&self, match_index: usize) -> Result<usize> {
        Ok(self.record(match_index)?.capture_count())
    }

    /// Start or end byte offset of a match's whole-match span.
    pub fn match_offset(&self, match_index: usize, endpoint: Endpoint) -> Result<usize> {
        let full = self.record(match_index)?.full_span();
        Ok(match endpoint {
            Endpoint::Start => full.start,
            Endpoint::End => full.end,
        })
    }

    /// Borrowed, exactly-sized view of a capture in the retained subject
    /// copy. `Ok(None)` for a group that did not participate in the
    /// match.
    pub fn capture_bytes(&self, match_index: usize, capture_index: usize) -> Result<Option<&[u8]>> {
        Ok(self
            .span(match_index, capture_index)?
            .map(|span| &self.subject[span.start..span.end]))
    }

    /// Copy a capture into `dest`, NUL-terminated within capacity.
    ///
    /// At most `dest.len() - 1` content bytes are written, followed by a
    /// terminator. The return value is the capture's true length, so a
    /// result of `dest.len()` or more means the copy was truncated. A
    /// group that did not participate extracts as empty. Never writes
    /// past `dest`.
    pub fn extract_capture(
        &self,
        match_index: usize,
        capture_index: usize,
        dest: &mut [u8],
    ) -> Result<usize> {
        let bytes = self.capture_bytes(match_index, capture_index)?.unwrap_or(&[]);
        if dest.is_empty() {
            return Ok(bytes.len());
        }
        let copied = bytes.len().min(dest.len() - 1);
        dest[..copied].copy_from_slice(&bytes[..copied]);
        dest[copied] = 0;
        Ok(bytes.len())
    }

    /// The stored record for a match.
    pub fn record(&self, match_index: usize) -> Result<&MatchRecord> {
        self.records.get(match_index).ok_or(Error::BadMatchIndex {
            index: match_index,
            count: self.records.len(),
        })
    }

    fn span(&self, match_index: usize, capture_index: usize) -> Result<Option<CaptureSpan>> {
        let record = self.record(match_index)?;
        record
            .span(capture_index)
            .ok_or(Error::BadCaptureIndex {
                index: capture_index,
                count: record.capture_count(),
            })
    }

    /// Replace all stored state with a fresh copy of `subject`. Dropping
    /// the old records and subject releases everything the prior
    /// operation stored.
    fn begin(&mut self, subject: &[u8]) {
        self.records.clear();
        self.subject.clear();
        self.subject.extend_from_slice(subject);
    }

    fn reset(&mut self) {
        self.records.clear();
        self.subject.clear();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
