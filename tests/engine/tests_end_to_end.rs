//! Edit → schedule → parse → formatting, through the public API.

#![allow(clippy::unwrap_used)]

use parsework::base::{ColorIndex, ColorRange, Formatting, WordRange};
use parsework::document::BufferEvent;

use crate::helpers::fixtures::{Host, ISSUES, NUMBERS};
use crate::helpers::recorder::Recorder;

fn color(offset: usize, length: usize, color: i32) -> Formatting {
    ColorRange::new(offset, length, ColorIndex(color)).into()
}

#[test]
fn test_numbers_and_spaces_are_colored() {
    let host = Host::new();
    let (doc, _handler) = host.attach("", &NUMBERS);
    let recorder = Recorder::attach(&doc);

    doc.load("42  ");
    host.settle();

    assert_eq!(doc.formatting(0).unwrap(), vec![color(0, 2, 1), color(2, 2, 0)]);
    assert_eq!(
        recorder.events(),
        vec![BufferEvent::Loaded, BufferEvent::Formatted]
    );
}

#[test]
fn test_unparseable_character_gets_error_marker() {
    let host = Host::new();
    let (doc, _handler) = host.attach("", &NUMBERS);

    doc.load("4x");
    host.settle();

    let formatting = doc.formatting(0).unwrap();
    assert_eq!(formatting, vec![color(0, 1, 1), color(1, 1, -4)]);
    assert!(formatting[1].is_error());
}

#[test]
fn test_annotations_use_line_relative_offsets() {
    let host = Host::new();
    let (doc, handler) = host.attach("1 22\n\n x 3", &NUMBERS);
    handler.reparse();
    host.settle();

    assert_eq!(
        doc.formatting(0).unwrap(),
        vec![color(0, 1, 1), color(1, 1, 0), color(2, 2, 1)]
    );
    assert!(doc.formatting(1).unwrap().is_empty());
    assert_eq!(
        doc.formatting(2).unwrap(),
        vec![color(0, 1, 0), color(1, 1, -4), color(2, 1, 0), color(3, 1, 1)]
    );
}

#[test]
fn test_word_states_carry_identity() {
    let host = Host::new();
    let (doc, _handler) = host.attach("", &ISSUES);

    doc.load("fixed #12, see #7");
    host.settle();

    let words: Vec<WordRange> = doc
        .formatting(0)
        .unwrap()
        .iter()
        .filter_map(|f| f.as_word().cloned())
        .collect();
    assert_eq!(
        words,
        vec![
            WordRange {
                offset: 6,
                length: 3,
                color: ColorIndex(4),
                state: "issue".into(),
            },
            WordRange {
                offset: 15,
                length: 2,
                color: ColorIndex(4),
                state: "issue".into(),
            },
        ]
    );
    assert!(doc.formatting(0).unwrap().contains(&color(0, 5, 2)));
    assert!(doc.formatting(0).unwrap().contains(&color(9, 1, 3)));
}

#[test]
fn test_reparse_is_idempotent() {
    let host = Host::new();
    let (doc, handler) = host.attach("", &ISSUES);
    doc.load("one #1\ntwo, #22 three\n\n?");
    host.settle();
    let first: Vec<_> = (0..doc.line_count())
        .map(|i| doc.formatting(i).unwrap())
        .collect();

    handler.reparse();
    host.settle();
    let second: Vec<_> = (0..doc.line_count())
        .map(|i| doc.formatting(i).unwrap())
        .collect();

    assert_eq!(first, second);
    assert!(first.iter().any(|line| !line.is_empty()));
}

#[test]
fn test_formatting_follows_latest_edit() {
    let host = Host::new();
    let (doc, _handler) = host.attach("1", &NUMBERS);

    doc.set_line(0, "1 2").unwrap();
    host.settle();
    assert_eq!(doc.formatting(0).unwrap().len(), 3);

    doc.set_line(0, "x").unwrap();
    host.settle();
    assert_eq!(doc.formatting(0).unwrap(), vec![color(0, 1, -4)]);
}
