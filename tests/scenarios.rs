//! End-to-end scenarios for the rematch public API.
//!
//! These tests are black-box: they drive compilation, sessions, and
//! extraction exactly the way an embedding caller would.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use rematch::{
    CompileOptions, Endpoint, Error, MatchOutcome, MatchSession, PatternHandle,
};

fn extract_to_string(session: &MatchSession, match_index: usize, capture_index: usize) -> String {
    let mut buffer = [0u8; 256];
    let len = session
        .extract_capture(match_index, capture_index, &mut buffer)
        .unwrap();
    String::from_utf8_lossy(&buffer[..len.min(buffer.len() - 1)]).into_owned()
}

/// Walk every match and capture of a comma-delimited subject, the way a
/// caller iterates `match_count` x `capture_count`.
#[test]
fn capture_group_walk_over_delimited_subject() {
    let mut session = MatchSession::compile(",(b),", &CompileOptions::default()).unwrap();

    let outcome = session.match_all(b"a,b,c,d,b,c").unwrap();
    assert_eq!(outcome, MatchOutcome::Matched(2));

    // First occurrence: ",b," spans [1,4), its group "b" spans [2,3).
    assert_eq!(session.match_offset(0, Endpoint::Start).unwrap(), 1);
    assert_eq!(session.match_offset(0, Endpoint::End).unwrap(), 4);
    assert_eq!(session.capture_count(0).unwrap(), 2);
    assert_eq!(extract_to_string(&session, 0, 0), ",b,");
    assert_eq!(extract_to_string(&session, 0, 1), "b");
    assert_eq!(session.capture_bytes(0, 1).unwrap(), Some(&b"b"[..]));

    // The search resumes at the previous match end, so the second
    // non-overlapping ",b," at [7,10) is found as well.
    assert_eq!(session.match_offset(1, Endpoint::Start).unwrap(), 7);
    assert_eq!(session.match_offset(1, Endpoint::End).unwrap(), 10);
    assert_eq!(extract_to_string(&session, 1, 0), ",b,");
    assert_eq!(extract_to_string(&session, 1, 1), "b");
}

#[test]
fn digit_runs_are_found_in_order() {
    let mut session = MatchSession::compile(r"\d+", &CompileOptions::default()).unwrap();

    assert_eq!(session.match_all(b"ab12cd34").unwrap(), MatchOutcome::Matched(2));
    assert_eq!(extract_to_string(&session, 0, 0), "12");
    assert_eq!(extract_to_string(&session, 1, 0), "34");
    assert_eq!(session.match_offset(0, Endpoint::Start).unwrap(), 2);
    assert_eq!(session.match_offset(1, Endpoint::Start).unwrap(), 6);
}

/// A pattern that matches the empty string must not hang `match_all`.
#[test]
fn zero_width_matches_terminate() {
    let mut session = MatchSession::compile("x*", &CompileOptions::default()).unwrap();

    let outcome = session.match_all(b"aaa").unwrap();
    assert_eq!(outcome, MatchOutcome::Matched(3));
    for i in 0..session.match_count() {
        assert_eq!(
            session.match_offset(i, Endpoint::Start).unwrap(),
            session.match_offset(i, Endpoint::End).unwrap()
        );
    }
}

#[test]
fn malformed_pattern_is_a_recoverable_error() {
    let err = PatternHandle::compile("(", &CompileOptions::default()).unwrap_err();
    match err {
        Error::Compile { offset, message } => {
            assert!(offset <= "(".len());
            assert!(!message.is_empty());
        }
        other => panic!("expected Compile error, got {other:?}"),
    }
}

#[test]
fn out_of_range_capture_index_writes_nothing() {
    let mut session = MatchSession::compile(",(b),", &CompileOptions::default()).unwrap();
    session.match_all(b"a,b,c").unwrap();

    let captures = session.capture_count(0).unwrap();
    let mut buffer = [0x55u8; 16];
    let err = session
        .extract_capture(0, captures, &mut buffer)
        .unwrap_err();
    assert!(matches!(err, Error::BadCaptureIndex { .. }));
    assert_eq!(buffer, [0x55u8; 16]);
}

/// Back-to-back operations leave exactly the second call's state.
#[test]
fn repeated_operations_leave_no_residue() {
    let mut session = MatchSession::compile(r"\d+", &CompileOptions::default()).unwrap();

    assert_eq!(session.match_all(b"1 22 333").unwrap(), MatchOutcome::Matched(3));
    assert_eq!(session.match_once(b"ab12cd34", 0).unwrap(), MatchOutcome::Matched(1));

    assert_eq!(session.match_count(), 1);
    assert_eq!(session.subject(), b"ab12cd34");
    assert_eq!(extract_to_string(&session, 0, 0), "12");
    assert!(session.capture_count(1).is_err());
}

#[test]
fn sessions_share_a_compiled_handle_across_threads() {
    let handle = PatternHandle::compile(r"\d+", &CompileOptions::default()).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|n| {
            let handle = handle.clone();
            std::thread::spawn(move || {
                let mut session = MatchSession::new(handle);
                let subject = format!("value-{n}-done");
                session.match_all(subject.as_bytes()).unwrap();
                session.match_count()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 1);
    }
}
