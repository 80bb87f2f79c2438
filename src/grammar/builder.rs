//! Grammar construction and reference resolution.
//!
//! ## Usage
//!
//! ```ignore
//! let grammar = GrammarBuilder::new("numbers")
//!     .state("start", [
//!         vec![ElemSpec::terminal("number").with_color(1)],
//!         vec![ElemSpec::terminal("space")],
//!     ])
//!     .build()?;
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::registry::TerminalRegistry;
use super::{ElemKind, Grammar, GrammarError, ProdElem, Production, State, StateId};
use crate::base::ColorIndex;

/// Unresolved description of a production element.
///
/// Exactly one of `term` (a terminal class name) or `state` (a state name)
/// must be set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "definitions", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "definitions", serde(default, deny_unknown_fields))]
pub struct ElemSpec {
    /// Terminal class, resolved through the [`TerminalRegistry`]
    pub term: Option<SmolStr>,
    /// Referenced state name
    pub state: Option<SmolStr>,
    /// Terminal argument (lexeme or character set)
    pub value: Option<SmolStr>,
    /// Color category (0 and up)
    pub color: u16,
    /// Overrides the default visibility
    pub visible: Option<bool>,
    /// Nonterminal matches keep their state identity in the formatting
    pub word: bool,
    /// Fewest characters a run terminal accepts (0 makes it optional)
    pub min: Option<usize>,
    /// Most characters a run terminal consumes
    pub max: Option<usize>,
}

impl ElemSpec {
    pub fn terminal(class: impl Into<SmolStr>) -> Self {
        Self {
            term: Some(class.into()),
            ..Self::default()
        }
    }

    pub fn nonterminal(state: impl Into<SmolStr>) -> Self {
        Self {
            state: Some(state.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<SmolStr>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_color(mut self, color: u16) -> Self {
        self.color = color;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn as_word(mut self) -> Self {
        self.word = true;
        self
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    fn has_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Collects state declarations and resolves them into a [`Grammar`].
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    name: SmolStr,
    start: Option<SmolStr>,
    states: Vec<(SmolStr, Vec<Vec<ElemSpec>>)>,
    registry: TerminalRegistry,
}

impl GrammarBuilder {
    /// The start state defaults to the one named `"start"`.
    pub const DEFAULT_START: &'static str = "start";

    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            start: None,
            states: Vec::new(),
            registry: TerminalRegistry::standard(),
        }
    }

    pub fn with_registry(mut self, registry: TerminalRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn start(mut self, state: impl Into<SmolStr>) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Declare a state with its alternatives in order.
    pub fn state<I, P>(mut self, name: impl Into<SmolStr>, productions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = ElemSpec>,
    {
        let productions = productions
            .into_iter()
            .map(|production| production.into_iter().collect())
            .collect();
        self.states.push((name.into(), productions));
        self
    }

    /// Resolve every reference and terminal class.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut ids: IndexMap<SmolStr, ()> = IndexMap::with_capacity(self.states.len());
        for (name, _) in &self.states {
            if ids.insert(name.clone(), ()).is_some() {
                return Err(GrammarError::DuplicateState(name.clone()));
            }
        }

        let start_name = self
            .start
            .clone()
            .unwrap_or_else(|| SmolStr::new_static(Self::DEFAULT_START));
        let start = ids
            .get_index_of(&start_name)
            .map(StateId::from_index)
            .ok_or_else(|| GrammarError::MissingStart {
                grammar: self.name.clone(),
                start: start_name.clone(),
            })?;

        let mut states = IndexMap::with_capacity(self.states.len());
        for (name, productions) in &self.states {
            if productions.is_empty() {
                return Err(GrammarError::EmptyState(name.clone()));
            }
            let productions = productions
                .iter()
                .map(|specs| {
                    specs
                        .iter()
                        .map(|spec| self.resolve(name, spec, &ids))
                        .collect::<Result<Vec<_>, _>>()
                        .map(Production::new)
                })
                .collect::<Result<Vec<_>, _>>()?;
            states.insert(name.clone(), State::new(name.clone(), productions));
        }

        tracing::debug!(
            grammar = %self.name,
            states = states.len(),
            start = %start_name,
            "grammar built"
        );
        Ok(Grammar::new(self.name, states, start))
    }

    fn resolve(
        &self,
        state: &SmolStr,
        spec: &ElemSpec,
        ids: &IndexMap<SmolStr, ()>,
    ) -> Result<ProdElem, GrammarError> {
        let color = ColorIndex::from(spec.color);
        match (&spec.term, &spec.state) {
            (Some(class), None) => {
                if spec.word {
                    return Err(GrammarError::invalid_element(
                        state.clone(),
                        format!("terminal '{class}' cannot be a word"),
                    ));
                }
                let ctor = self.registry.resolve(class).ok_or_else(|| {
                    GrammarError::UnknownTerminalClass {
                        state: state.clone(),
                        class: class.clone(),
                    }
                })?;
                let terminal = ctor(spec.value.as_deref())
                    .and_then(|terminal| terminal.with_bounds(spec.min, spec.max))
                    .map_err(|message| GrammarError::invalid_terminal(class.clone(), message))?;
                let visible = spec
                    .visible
                    .unwrap_or_else(|| terminal.is_visible_by_default());
                Ok(ProdElem::new(
                    ElemKind::Terminal(terminal),
                    color,
                    visible,
                    false,
                ))
            }
            (None, Some(reference)) => {
                if spec.has_bounds() {
                    return Err(GrammarError::invalid_element(
                        state.clone(),
                        format!("reference to '{reference}' cannot take min/max"),
                    ));
                }
                let id = ids
                    .get_index_of(reference)
                    .map(StateId::from_index)
                    .ok_or_else(|| GrammarError::UnresolvedReference {
                        state: state.clone(),
                        reference: reference.clone(),
                    })?;
                let visible = spec.visible.unwrap_or(spec.word);
                Ok(ProdElem::new(
                    ElemKind::Nonterminal(id),
                    color,
                    visible,
                    spec.word,
                ))
            }
            (Some(_), Some(_)) => Err(GrammarError::invalid_element(
                state.clone(),
                "element names both a terminal and a state",
            )),
            (None, None) => Err(GrammarError::invalid_element(
                state.clone(),
                "element names neither a terminal nor a state",
            )),
        }
    }
}
