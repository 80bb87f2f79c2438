//! Ordered-choice lookahead over the grammar.
//!
//! Selection is depth-first: the first production whose every element matches
//! contiguously wins, and once a nested state has picked an alternative that
//! choice is final (no global backtracking).

use crate::base::CharStream;
use crate::grammar::{ElemKind, Grammar, ProdElem, StateId};

use super::ParseFault;

/// The alternative a state picked at some position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) production: usize,
    pub(crate) length: usize,
}

pub(crate) struct Matcher<'a, S: ?Sized> {
    grammar: &'a Grammar,
    stream: &'a S,
}

impl<'a, S: CharStream + ?Sized> Matcher<'a, S> {
    pub(crate) fn new(grammar: &'a Grammar, stream: &'a S) -> Self {
        Self { grammar, stream }
    }

    /// Match a single element; `depth` is the nesting budget left for states.
    pub(crate) fn match_elem(
        &self,
        elem: &ProdElem,
        pos: usize,
        depth: usize,
    ) -> Result<Option<usize>, ParseFault> {
        match elem.kind() {
            ElemKind::Terminal(terminal) => Ok(terminal.try_match(self.stream, pos)),
            ElemKind::Nonterminal(id) => Ok(self
                .match_state(*id, pos, depth)?
                .map(|selection| selection.length)),
        }
    }

    /// Pick the first alternative of `id` that matches at `pos`.
    ///
    /// A state at exhausted depth never matches, which is what stops
    /// left-recursive grammars.
    pub(crate) fn match_state(
        &self,
        id: StateId,
        pos: usize,
        depth: usize,
    ) -> Result<Option<Selection>, ParseFault> {
        if depth == 0 {
            return Ok(None);
        }
        let state = self
            .grammar
            .state(id)
            .ok_or(ParseFault::UnknownState(id.index()))?;

        'productions: for (production, alternative) in state.productions().iter().enumerate() {
            let mut length = 0;
            for elem in alternative.elems() {
                match self.match_elem(elem, pos + length, depth - 1)? {
                    Some(matched) => length += matched,
                    None => continue 'productions,
                }
            }
            return Ok(Some(Selection { production, length }));
        }
        Ok(None)
    }
}
