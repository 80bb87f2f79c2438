//! Grammars loaded from JSON definitions and looked up by file extension.

#![cfg(feature = "definitions")]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use parsework::base::{ColorIndex, ColorRange, Formatting};
use parsework::document::Document;
use parsework::grammar::{GrammarDef, GrammarRegistry};
use parsework::handler::{HandlerError, ParseHandler};

use crate::helpers::fixtures::Host;

const CALC: &str = r#"{
    "name": "calc",
    "extensions": ["calc"],
    "states": [
        { "name": "start", "productions": [
            [ { "state": "sum", "word": true, "color": 5 } ],
            [ { "term": "number", "color": 1 } ],
            [ { "term": "space", "visible": false } ]
        ] },
        { "name": "sum", "productions": [
            [ { "term": "number", "visible": false },
              { "term": "anyof", "value": "+-", "visible": false },
              { "term": "number", "visible": false } ]
        ] }
    ]
}"#;

fn registry_from(dir: &Path) -> GrammarRegistry {
    let path = dir.join("calc.json");
    fs::write(&path, CALC).unwrap();
    let mut registry = GrammarRegistry::new();
    registry.register_def(GrammarDef::load(&path).unwrap()).unwrap();
    registry
}

#[test]
fn test_handler_uses_grammar_for_file_extension() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_from(dir.path());
    let grammar = registry.for_path(Path::new("notes/totals.CALC")).unwrap();
    assert_eq!(grammar.name(), "calc");

    let host = Host::new();
    let (doc, _handler) = host.attach("", &grammar);
    doc.load("1+2 7");
    host.settle();

    let formatting = doc.formatting(0).unwrap();
    assert_eq!(formatting.len(), 2);
    assert_eq!(formatting[0].as_word().unwrap().state, "sum");
    assert_eq!(formatting[0].length(), 3);
    assert_eq!(
        formatting[1],
        Formatting::from(ColorRange::new(4, 1, ColorIndex(1)))
    );
}

#[test]
fn test_handler_by_language_name() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_from(dir.path());
    let host = Host::new();
    let doc = Document::from_text("3-1");

    let handler = ParseHandler::builder()
        .scheduler(&host.scheduler)
        .document(&doc)
        .language(&registry, "calc")
        .build()
        .unwrap();
    handler.reparse();
    host.settle();
    assert_eq!(doc.formatting(0).unwrap().len(), 1);

    let missing = ParseHandler::builder()
        .scheduler(&host.scheduler)
        .document(&doc)
        .language(&registry, "sql")
        .build();
    assert!(matches!(missing, Err(HandlerError::UnknownLanguage(_))));
}

#[test]
fn test_inline_definition() {
    let host = Host::new();
    let doc = Document::from_text("12");
    let handler = ParseHandler::builder()
        .scheduler(&host.scheduler)
        .document(&doc)
        .definition(CALC)
        .build()
        .unwrap();
    handler.reparse();
    host.settle();
    assert_eq!(
        doc.formatting(0).unwrap(),
        vec![Formatting::from(ColorRange::new(0, 2, ColorIndex(1)))]
    );
}
