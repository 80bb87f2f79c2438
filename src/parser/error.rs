//! Engine-internal parse faults.

use thiserror::Error;

/// An internal inconsistency while parsing.
///
/// Unlike a parse error (the input doesn't fit the grammar), a fault aborts the
/// current run. It is reported through
/// [`ParseEvents::on_parser_exception`](super::ParseEvents::on_parser_exception).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFault {
    /// An element accepted during lookahead failed to match when expanded.
    #[error("element {elem} accepted at {position} no longer matches")]
    Inconsistent { elem: String, position: usize },

    /// A production references a state id the grammar doesn't have.
    #[error("grammar has no state with id {0}")]
    UnknownState(usize),

    /// A production element index is out of range.
    #[error("state {state} has no element {production}.{index}")]
    UnknownElement {
        state: String,
        production: usize,
        index: usize,
    },

    /// A listener failed while handling a parse event.
    #[error("parse listener failed: {0}")]
    Listener(String),
}

impl ParseFault {
    /// Create a listener fault.
    pub fn listener(message: impl Into<String>) -> Self {
        Self::Listener(message.into())
    }
}
