//! Error types for grammar construction and lookup.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while building, loading, or querying a grammar.
///
/// All of these are construction-time failures; a built [`Grammar`](super::Grammar)
/// never produces them while parsing.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// `find_state` was asked for a state that isn't declared.
    #[error("grammar '{grammar}' has no state named '{state}'")]
    UnknownState { grammar: SmolStr, state: SmolStr },

    /// A production references a state that isn't declared.
    #[error("state '{state}' references undeclared state '{reference}'")]
    UnresolvedReference { state: SmolStr, reference: SmolStr },

    /// A production names a terminal class the registry doesn't know.
    #[error("state '{state}' uses unknown terminal class '{class}'")]
    UnknownTerminalClass { state: SmolStr, class: SmolStr },

    /// A terminal constructor rejected its arguments.
    #[error("invalid '{class}' terminal: {message}")]
    InvalidTerminal { class: SmolStr, message: String },

    /// Two states share a name.
    #[error("state '{0}' is declared more than once")]
    DuplicateState(SmolStr),

    /// The designated start state isn't declared.
    #[error("grammar '{grammar}' has no start state '{start}'")]
    MissingStart { grammar: SmolStr, start: SmolStr },

    /// A state with no productions can never match.
    #[error("state '{0}' has no productions")]
    EmptyState(SmolStr),

    /// An element spec is neither a terminal nor a state reference (or both).
    #[error("invalid element in state '{state}': {message}")]
    InvalidElement { state: SmolStr, message: String },

    /// A language with this name is already registered.
    #[error("grammar '{0}' is already registered")]
    DuplicateGrammar(SmolStr),

    /// IO error while reading a definition file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON grammar definition.
    #[cfg(feature = "definitions")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GrammarError {
    /// Create an invalid terminal error.
    pub fn invalid_terminal(class: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self::InvalidTerminal {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Create an invalid element error.
    pub fn invalid_element(state: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self::InvalidElement {
            state: state.into(),
            message: message.into(),
        }
    }
}
