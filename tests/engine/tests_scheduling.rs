//! Cooperative scheduling of parse workers.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use parsework::handler::ParseOptions;
use parsework::work::WorkerStatus;

use crate::helpers::fixtures::{Host, NUMBERS, one_step_per_slice};
use crate::helpers::recorder::Recorder;

const LONG_LINE: &str = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16";

#[test]
fn test_edit_during_parse_replaces_it() {
    let host = Host::new();
    let (doc, handler) = host.attach_with(LONG_LINE, &NUMBERS, one_step_per_slice());
    let recorder = Recorder::attach(&doc);

    handler.reparse();
    for _ in 0..4 {
        host.scheduler.tick().unwrap();
        assert!(host.scheduler.pending_count() <= 1);
    }
    assert_eq!(handler.status(), WorkerStatus::Queued);

    doc.set_line(0, "9").unwrap();
    assert_eq!(host.scheduler.pending_count(), 1);
    while host.scheduler.tick().unwrap().ran > 0 {
        assert!(host.scheduler.pending_count() <= 1);
    }

    assert_eq!(doc.formatting(0).unwrap().len(), 1);
    assert_eq!(recorder.formatted(), 1);
}

#[test]
fn test_two_documents_share_the_scheduler_fairly() {
    let host = Host::new();
    let (first, first_handler) = host.attach_with(LONG_LINE, &NUMBERS, one_step_per_slice());
    let (second, second_handler) = host.attach_with(LONG_LINE, &NUMBERS, one_step_per_slice());
    let first_done = Recorder::attach(&first);
    let second_done = Recorder::attach(&second);

    first_handler.reparse();
    second_handler.reparse();
    for _ in 0..3 {
        assert_eq!(host.scheduler.tick().unwrap().ran, 2);
    }

    // Both made progress and neither has finished.
    assert!(first.has_formatting());
    assert!(second.has_formatting());
    assert_eq!(first_done.formatted(), 0);
    assert_eq!(second_done.formatted(), 0);

    host.settle();
    assert_eq!(first.formatting(0).unwrap(), second.formatting(0).unwrap());
    assert_eq!(first_done.formatted(), 1);
    assert_eq!(second_done.formatted(), 1);
}

#[test]
fn test_step_interval_spaces_out_slices() {
    let host = Host::new();
    let options = ParseOptions {
        step_interval: Duration::from_millis(10),
        ..ParseOptions::default()
    };
    let (doc, handler) = host.attach_with("1 2", &NUMBERS, options);
    handler.reparse();

    let report = host.scheduler.tick().unwrap();
    assert_eq!(report.ran, 1);
    assert_eq!(report.next_wait, Some(Duration::from_millis(10)));
    assert_eq!(host.scheduler.tick().unwrap().ran, 0);

    host.clock.advance(Duration::from_millis(10));
    assert_eq!(host.scheduler.tick().unwrap().ran, 1);
    assert!(doc.has_formatting());
}

#[test]
fn test_time_slice_runs_several_rounds() {
    let host = Host::new();
    let (doc, handler) = host.attach_with("1 2 3", &NUMBERS, one_step_per_slice());
    handler.reparse();

    let report = host.scheduler.run_slice().unwrap();
    assert!(report.ran > 1);
    assert!(report.is_idle());
    assert_eq!(doc.formatting(0).unwrap().len(), 5);
    assert_eq!(handler.status(), WorkerStatus::Free);
}

#[test]
fn test_idle_host_can_stop_its_timer() {
    let host = Host::new();
    let (_doc, handler) = host.attach("1", &NUMBERS);
    assert!(host.scheduler.tick().unwrap().is_idle());

    handler.reparse();
    let report = host.scheduler.tick().unwrap();
    assert_eq!(report.next_wait, Some(Duration::ZERO));
    host.settle();
    assert!(host.scheduler.tick().unwrap().is_idle());
}
