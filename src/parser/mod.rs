//! Parser: resumable top-down matching of a grammar over a character stream.
//!
//! The [`ParseIterator`] repeatedly expands the grammar's start state from the
//! current position. Alternatives are chosen by ordered-choice lookahead, then
//! the chosen production's elements are matched one per step, so a run can be
//! interleaved with other work. Listeners implement [`ParseEvents`]:
//!
//! - `on_match` for every visible element, left to right
//! - `on_parser_error` when the start state can't match; the iterator skips
//!   one character and starts over
//! - `on_parser_exception` for engine faults, which end the run

mod error;
mod events;
mod iterator;
mod matcher;

pub use error::ParseFault;
pub use events::{MemoryElem, ParseEvent, ParseEvents};
pub use iterator::{ParseIterator, ParseStep};

use std::sync::Arc;

use crate::base::CharStream;
use crate::grammar::Grammar;


/// Parse a whole stream at once, collecting every event.
pub fn parse_events<S: CharStream>(grammar: Arc<Grammar>, stream: S) -> Vec<ParseEvent> {
    let mut iterator = ParseIterator::new(grammar, stream, Vec::<ParseEvent>::new());
    iterator.run_to_end();
    iterator.into_events()
}
