//! Resumable parse driver.
//!
//! The iterator keeps an explicit stack of pending production elements instead
//! of recursing, so a run can be suspended after any step and resumed later by
//! the scheduler. Each call to [`ParseIterator::step`] handles exactly one
//! stack element.

use std::sync::Arc;

use crate::base::CharStream;
use crate::grammar::{ElemKind, Grammar, ProdElem, StateId};

use super::events::{MemoryElem, ParseEvents};
use super::matcher::Matcher;
use super::ParseFault;

/// Outcome of one parse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStep {
    /// More work remains.
    Continue,
    /// The stream is exhausted.
    Finished,
    /// An engine fault aborted the run.
    Failed,
}

/// Where a pending element lives in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElemRef {
    /// The grammar's start state, expanded at top level
    Start,
    Child {
        state: StateId,
        production: usize,
        index: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    elem: ElemRef,
    /// Nesting budget left when this element is expanded
    depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Finished,
    Failed,
}

/// Walks a grammar over a stream, reporting matches and errors to `E`.
pub struct ParseIterator<S, E> {
    grammar: Arc<Grammar>,
    stream: S,
    events: E,
    stack: Vec<Frame>,
    position: usize,
    max_depth: usize,
    run: RunState,
}

impl<S: CharStream, E: ParseEvents> ParseIterator<S, E> {
    /// Default nesting budget for nonterminal expansion.
    pub const DEFAULT_MAX_DEPTH: usize = 30;

    pub fn new(grammar: Arc<Grammar>, stream: S, events: E) -> Self {
        Self {
            grammar,
            stream,
            events,
            stack: Vec::new(),
            position: 0,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            run: RunState::Running,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Current stream position.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_done(&self) -> bool {
        self.run != RunState::Running
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    /// Process one pending element.
    pub fn step(&mut self) -> ParseStep {
        match self.run {
            RunState::Finished => return ParseStep::Finished,
            RunState::Failed => return ParseStep::Failed,
            RunState::Running => {}
        }

        match self.advance() {
            Ok(true) => ParseStep::Continue,
            Ok(false) => {
                self.run = RunState::Finished;
                tracing::trace!(position = self.position, "parse finished");
                ParseStep::Finished
            }
            Err(fault) => {
                tracing::warn!(position = self.position, %fault, "parse aborted");
                self.events.on_parser_exception(&fault, self.position);
                self.stack.clear();
                self.run = RunState::Failed;
                ParseStep::Failed
            }
        }
    }

    /// Step until the run ends.
    pub fn run_to_end(&mut self) -> ParseStep {
        loop {
            match self.step() {
                ParseStep::Continue => {}
                done => return done,
            }
        }
    }

    fn advance(&mut self) -> Result<bool, ParseFault> {
        let grammar = Arc::clone(&self.grammar);

        let frame = match self.stack.pop() {
            Some(frame) => frame,
            None if self.stream.in_bounds(self.position) => Frame {
                elem: ElemRef::Start,
                depth: self.max_depth,
            },
            None => return Ok(false),
        };
        let top_level = frame.elem == ElemRef::Start;
        let elem = resolve(&grammar, frame.elem)?;

        match elem.kind() {
            ElemKind::Terminal(terminal) => {
                let length = terminal
                    .try_match(&self.stream, self.position)
                    .ok_or_else(|| self.inconsistent(elem))?;
                if elem.is_visible() {
                    self.events.on_match(&MemoryElem {
                        elem,
                        offset: self.position,
                        length,
                        state: None,
                    })?;
                }
                self.position += length;
            }
            ElemKind::Nonterminal(id) => {
                let selection = Matcher::new(&grammar, &self.stream).match_state(
                    *id,
                    self.position,
                    frame.depth,
                )?;
                match selection {
                    // A zero-length top-level match would never make progress.
                    Some(selection) if !(top_level && selection.length == 0) => {
                        if elem.is_visible() {
                            self.events.on_match(&MemoryElem {
                                elem,
                                offset: self.position,
                                length: selection.length,
                                state: grammar.state(*id).map(|state| state.name()),
                            })?;
                        }
                        self.push_production(&grammar, *id, selection.production, frame.depth)?;
                    }
                    _ if top_level => {
                        tracing::trace!(position = self.position, "no alternative matched");
                        self.events.on_parser_error(elem, self.position)?;
                        self.position += 1;
                    }
                    _ => return Err(self.inconsistent(elem)),
                }
            }
        }
        Ok(true)
    }

    /// Push a production's elements so the first one is popped next.
    fn push_production(
        &mut self,
        grammar: &Grammar,
        state: StateId,
        production: usize,
        depth: usize,
    ) -> Result<(), ParseFault> {
        let count = grammar
            .state(state)
            .and_then(|s| s.productions().get(production))
            .map(|p| p.len())
            .ok_or(ParseFault::UnknownState(state.index()))?;
        let depth = depth.saturating_sub(1);
        self.stack.extend((0..count).rev().map(|index| Frame {
            elem: ElemRef::Child {
                state,
                production,
                index,
            },
            depth,
        }));
        Ok(())
    }

    fn inconsistent(&self, elem: &ProdElem) -> ParseFault {
        let elem = match elem.kind() {
            ElemKind::Terminal(terminal) => terminal.to_string(),
            ElemKind::Nonterminal(id) => self
                .grammar
                .state(*id)
                .map(|state| state.name().to_string())
                .unwrap_or_else(|| format!("#{}", id.index())),
        };
        ParseFault::Inconsistent {
            elem,
            position: self.position,
        }
    }
}

fn resolve(grammar: &Grammar, elem: ElemRef) -> Result<&ProdElem, ParseFault> {
    match elem {
        ElemRef::Start => Ok(grammar.start_elem()),
        ElemRef::Child {
            state,
            production,
            index,
        } => {
            let found = grammar.state(state).ok_or(ParseFault::UnknownState(state.index()))?;
            found
                .productions()
                .get(production)
                .and_then(|p| p.get(index))
                .ok_or_else(|| ParseFault::UnknownElement {
                    state: found.name().to_string(),
                    production,
                    index,
                })
        }
    }
}
