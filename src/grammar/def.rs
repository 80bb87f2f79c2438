//! JSON grammar definitions.
//!
//! ```json
//! {
//!   "name": "numbers",
//!   "start": "start",
//!   "states": [
//!     { "name": "start", "productions": [
//!         [ { "term": "number", "color": 1 } ],
//!         [ { "term": "space" } ]
//!     ] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::builder::{ElemSpec, GrammarBuilder};
use super::registry::TerminalRegistry;
use super::{Grammar, GrammarError};

/// Serialized form of a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarDef {
    pub name: SmolStr,
    #[serde(default)]
    pub start: Option<SmolStr>,
    /// File extensions (without the dot) this language applies to
    #[serde(default)]
    pub extensions: Vec<SmolStr>,
    pub states: Vec<StateDef>,
}

/// Serialized form of one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDef {
    pub name: SmolStr,
    pub productions: Vec<Vec<ElemSpec>>,
}

impl GrammarDef {
    pub fn from_json_str(json: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, GrammarError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn into_builder(self, registry: TerminalRegistry) -> GrammarBuilder {
        let mut builder = GrammarBuilder::new(self.name).with_registry(registry);
        if let Some(start) = self.start {
            builder = builder.start(start);
        }
        for state in self.states {
            builder = builder.state(state.name, state.productions);
        }
        builder
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        self.into_builder(TerminalRegistry::standard()).build()
    }
}

impl Grammar {
    /// Build a grammar from a JSON definition using the standard terminal classes.
    pub fn from_json_str(json: &str) -> Result<Grammar, GrammarError> {
        GrammarDef::from_json_str(json)?.build()
    }

    /// Load and build a grammar definition file.
    pub fn load(path: &Path) -> Result<Grammar, GrammarError> {
        GrammarDef::load(path)?.build()
    }
}
