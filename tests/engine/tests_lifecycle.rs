//! Enabling, disabling, commands and disposal.

#![allow(clippy::unwrap_used)]

use parsework::work::{WorkCommand, WorkerStatus};

use crate::helpers::fixtures::{Host, NUMBERS, one_step_per_slice};
use crate::helpers::recorder::Recorder;

#[test]
fn test_stop_then_resume() {
    let host = Host::new();
    let (doc, handler) = host.attach_with("1 2 3 4", &NUMBERS, one_step_per_slice());
    let recorder = Recorder::attach(&doc);

    handler.reparse();
    host.scheduler.tick().unwrap();
    host.scheduler.tick().unwrap();
    assert!(handler.execute(WorkCommand::STOP_ID));
    assert_eq!(handler.status(), WorkerStatus::Free);
    assert_eq!(host.settle(), 0);
    assert_eq!(recorder.formatted(), 0);

    handler.reparse();
    host.settle();
    assert_eq!(doc.formatting(0).unwrap().len(), 7);
    assert_eq!(recorder.formatted(), 1);
}

#[test]
fn test_pause_keeps_partial_progress() {
    let host = Host::new();
    let (doc, handler) = host.attach_with("1 2 3 4", &NUMBERS, one_step_per_slice());

    handler.reparse();
    for _ in 0..4 {
        host.scheduler.tick().unwrap();
    }
    assert!(handler.execute(WorkCommand::PAUSE_ID));
    let partial = doc.formatting(0).unwrap();
    assert!(!partial.is_empty());
    assert_eq!(host.settle(), 0);
    assert_eq!(doc.formatting(0).unwrap(), partial);

    assert!(handler.execute(WorkCommand::PLAY_ID));
    host.settle();
    assert_eq!(doc.formatting(0).unwrap().len(), 7);
}

#[test]
fn test_disable_and_enable() {
    let host = Host::new();
    let (doc, handler) = host.attach("1 2", &NUMBERS);
    handler.reparse();
    host.settle();
    assert!(doc.has_formatting());

    handler.set_parsing_enabled(false);
    assert!(!doc.has_formatting());
    doc.set_line(0, "3 4 5").unwrap();
    assert_eq!(host.settle(), 0);
    assert!(!doc.has_formatting());

    handler.set_parsing_enabled(true);
    host.settle();
    assert_eq!(doc.formatting(0).unwrap().len(), 5);
}

#[test]
fn test_dispose_mid_parse() {
    let host = Host::new();
    let (doc, mut handler) = host.attach_with("1 2 3 4", &NUMBERS, one_step_per_slice());
    let recorder = Recorder::attach(&doc);

    handler.reparse();
    host.scheduler.tick().unwrap();
    handler.dispose();

    assert_eq!(host.settle(), 0);
    assert_eq!(recorder.formatted(), 0);
    doc.set_line(0, "5").unwrap();
    assert_eq!(host.scheduler.pending_count(), 0);
    // Only the recorder is left.
    assert_eq!(doc.observer_count(), 1);
}

#[test]
fn test_unknown_command_is_not_handled() {
    let host = Host::new();
    let (_doc, handler) = host.attach("1", &NUMBERS);
    assert!(!handler.execute(uuid::Uuid::nil()));
}
