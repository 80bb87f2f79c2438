//! Grammar model: states, productions, and production elements.
//!
//! A [`Grammar`] is an immutable graph of named [`State`]s. Each state holds an
//! ordered list of [`Production`] alternatives, tried in declaration order
//! (ordered choice). A production is a sequence of [`ProdElem`]s, each either a
//! [`Terminal`] matcher or a reference to another state.
//!
//! Grammars are built once per language through [`GrammarBuilder`] (or loaded
//! from a JSON definition) and shared as `Arc<Grammar>` for the life of the
//! process. Every state reference is resolved at build time.

mod builder;
#[cfg(feature = "definitions")]
mod def;
mod error;
mod languages;
mod registry;
mod terminal;

pub use builder::{ElemSpec, GrammarBuilder};
#[cfg(feature = "definitions")]
pub use def::{GrammarDef, StateDef};
pub use error::GrammarError;
pub use languages::GrammarRegistry;
pub use registry::{TerminalCtor, TerminalRegistry};
pub use terminal::{Bounds, Terminal};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::ColorIndex;


/// Index of a state within its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a production element matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElemKind {
    Terminal(Terminal),
    Nonterminal(StateId),
}

/// One element of a production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProdElem {
    kind: ElemKind,
    color: ColorIndex,
    visible: bool,
    word: bool,
}

impl ProdElem {
    pub(crate) fn new(kind: ElemKind, color: ColorIndex, visible: bool, word: bool) -> Self {
        Self {
            kind,
            color,
            visible,
            word,
        }
    }

    pub fn kind(&self) -> &ElemKind {
        &self.kind
    }

    pub fn color(&self) -> ColorIndex {
        self.color
    }

    /// Visible matches are reported to parse listeners.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Words carry semantic identity (their state name) into the formatting.
    pub fn is_word(&self) -> bool {
        self.word
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, ElemKind::Terminal(_))
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match &self.kind {
            ElemKind::Terminal(terminal) => Some(terminal),
            ElemKind::Nonterminal(_) => None,
        }
    }

    pub fn as_state(&self) -> Option<StateId> {
        match self.kind {
            ElemKind::Nonterminal(id) => Some(id),
            ElemKind::Terminal(_) => None,
        }
    }
}

/// An ordered element sequence; matches only if every element matches contiguously.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Production {
    elems: Vec<ProdElem>,
}

impl Production {
    pub(crate) fn new(elems: Vec<ProdElem>) -> Self {
        Self { elems }
    }

    pub fn elems(&self) -> &[ProdElem] {
        &self.elems
    }

    pub fn get(&self, index: usize) -> Option<&ProdElem> {
        self.elems.get(index)
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}

/// A named set of alternative productions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: SmolStr,
    productions: Vec<Production>,
}

impl State {
    pub(crate) fn new(name: SmolStr, productions: Vec<Production>) -> Self {
        Self { name, productions }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternatives in declaration order.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }
}

/// An immutable, fully-resolved language description.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: SmolStr,
    states: IndexMap<SmolStr, State>,
    start: StateId,
    /// Synthetic element standing for the start state at top level.
    start_elem: ProdElem,
}

impl Grammar {
    pub(crate) fn new(name: SmolStr, states: IndexMap<SmolStr, State>, start: StateId) -> Self {
        Self {
            name,
            states,
            start,
            start_elem: ProdElem::new(
                ElemKind::Nonterminal(start),
                ColorIndex::PLAIN,
                false,
                false,
            ),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// The element the parser expands at every top-level position.
    pub fn start_elem(&self) -> &ProdElem {
        &self.start_elem
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get_index(id.index()).map(|(_, state)| state)
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.get_index_of(name).map(StateId::from_index)
    }

    /// Look up a state by name.
    pub fn find_state(&self, name: &str) -> Result<&State, GrammarError> {
        self.states
            .get(name)
            .ok_or_else(|| GrammarError::UnknownState {
                grammar: self.name.clone(),
                state: SmolStr::new(name),
            })
    }

    /// States in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
