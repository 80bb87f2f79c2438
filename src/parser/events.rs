//! Parse listener interface and recorded parse events.

use crate::base::ColorIndex;
use crate::grammar::ProdElem;

use super::ParseFault;

/// A witnessed match: which element matched, where, and how long.
#[derive(Debug, Clone, Copy)]
pub struct MemoryElem<'g> {
    pub elem: &'g ProdElem,
    /// Absolute stream offset
    pub offset: usize,
    pub length: usize,
    /// State name for nonterminal matches
    pub state: Option<&'g str>,
}

impl MemoryElem<'_> {
    pub fn color(&self) -> ColorIndex {
        self.elem.color()
    }

    pub fn is_word(&self) -> bool {
        self.elem.is_word()
    }

    pub fn is_terminal(&self) -> bool {
        self.elem.is_terminal()
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Receives parse events as the iterator works.
///
/// Returning an error from `on_match` or `on_parser_error` aborts the run and
/// is reported back through `on_parser_exception`.
pub trait ParseEvents {
    /// A visible element matched, in left-to-right order.
    fn on_match(&mut self, memory: &MemoryElem<'_>) -> Result<(), ParseFault>;

    /// Nothing in the start state matched at `position`.
    fn on_parser_error(&mut self, failed: &ProdElem, position: usize) -> Result<(), ParseFault>;

    /// The engine hit an internal fault; the run stops after this.
    fn on_parser_exception(&mut self, fault: &ParseFault, position: usize);
}

/// One recorded parse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    Match {
        /// Terminal display name or state name
        label: String,
        offset: usize,
        length: usize,
        color: ColorIndex,
    },
    Error {
        position: usize,
    },
    Exception {
        message: String,
        position: usize,
    },
}

/// Collects every event, in order. Handy for debugging grammars.
impl ParseEvents for Vec<ParseEvent> {
    fn on_match(&mut self, memory: &MemoryElem<'_>) -> Result<(), ParseFault> {
        let label = match (memory.elem.as_terminal(), memory.state) {
            (Some(terminal), _) => terminal.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => String::new(),
        };
        self.push(ParseEvent::Match {
            label,
            offset: memory.offset,
            length: memory.length,
            color: memory.color(),
        });
        Ok(())
    }

    fn on_parser_error(&mut self, _failed: &ProdElem, position: usize) -> Result<(), ParseFault> {
        self.push(ParseEvent::Error { position });
        Ok(())
    }

    fn on_parser_exception(&mut self, fault: &ParseFault, position: usize) {
        self.push(ParseEvent::Exception {
            message: fault.to_string(),
            position,
        });
    }
}
