//! Shared grammars and a manually clocked host.

use std::rc::Rc;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parsework::document::Document;
use parsework::grammar::{ElemSpec, Grammar, GrammarBuilder};
use parsework::handler::{ParseHandler, ParseOptions};
use parsework::work::{ManualClock, RoundRobin};

/// Numbers (color 1) separated by spaces and line breaks.
pub static NUMBERS: Lazy<Arc<Grammar>> = Lazy::new(|| {
    Arc::new(
        GrammarBuilder::new("numbers")
            .state(
                "start",
                [
                    vec![ElemSpec::terminal("number").with_color(1)],
                    vec![ElemSpec::terminal("space")],
                    vec![ElemSpec::terminal("cr").with_visible(false)],
                ],
            )
            .build()
            .unwrap(),
    )
});

/// Prose with `#123` issue references marked as words.
pub static ISSUES: Lazy<Arc<Grammar>> = Lazy::new(|| {
    Arc::new(
        GrammarBuilder::new("issues")
            .state(
                "start",
                [
                    vec![ElemSpec::nonterminal("issue").as_word().with_color(4)],
                    vec![ElemSpec::terminal("word").with_color(2)],
                    vec![ElemSpec::terminal("space").with_visible(false)],
                    vec![ElemSpec::terminal("cr").with_visible(false)],
                    vec![ElemSpec::terminal("anyof").with_value(".,;:!?").with_color(3)],
                ],
            )
            .state(
                "issue",
                [vec![
                    ElemSpec::terminal("token").with_value("#").with_visible(false),
                    ElemSpec::terminal("number").with_visible(false),
                ]],
            )
            .build()
            .unwrap(),
    )
});

/// A scheduler driven by a clock that only moves when the test says so.
pub struct Host {
    pub scheduler: RoundRobin,
    pub clock: ManualClock,
}

impl Host {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let scheduler = RoundRobin::with_clock(Rc::new(clock.clone()));
        Self { scheduler, clock }
    }

    pub fn attach(&self, text: &str, grammar: &Arc<Grammar>) -> (Document, ParseHandler) {
        self.attach_with(text, grammar, ParseOptions::default())
    }

    pub fn attach_with(
        &self,
        text: &str,
        grammar: &Arc<Grammar>,
        options: ParseOptions,
    ) -> (Document, ParseHandler) {
        let document = Document::from_text(text);
        let handler = ParseHandler::builder()
            .scheduler(&self.scheduler)
            .document(&document)
            .grammar(Arc::clone(grammar))
            .options(options)
            .build()
            .unwrap();
        (document, handler)
    }

    /// Run everything that is due until nothing is. Returns worker steps run.
    pub fn settle(&self) -> usize {
        self.scheduler.run_until_idle(10_000).unwrap()
    }
}

pub fn one_step_per_slice() -> ParseOptions {
    ParseOptions {
        slice_budget: 1,
        ..ParseOptions::default()
    }
}
