//! Closed registry mapping terminal class names to constructors.
//!
//! Grammar definitions name terminals by class (`"number"`, `"token"`, ...).
//! The registry resolves those names when the grammar is built, so an
//! unknown class fails construction instead of silently matching nothing.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::terminal::{Bounds, Terminal};

/// Builds a terminal from the element's optional `value` attribute.
pub type TerminalCtor = fn(Option<&str>) -> Result<Terminal, String>;

/// Terminal class name → constructor.
#[derive(Debug, Clone)]
pub struct TerminalRegistry {
    ctors: FxHashMap<SmolStr, TerminalCtor>,
}

impl Default for TerminalRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TerminalRegistry {
    /// A registry with no classes at all.
    pub fn empty() -> Self {
        Self {
            ctors: FxHashMap::default(),
        }
    }

    /// The text terminal classes.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("token", |value| lexeme(value).map(Terminal::Token));
        registry.register("literal", |value| lexeme(value).map(Terminal::Literal));
        registry.register("number", |_| Ok(Terminal::Number(Bounds::RUN)));
        registry.register("space", |_| Ok(Terminal::Whitespace(Bounds::RUN)));
        registry.register("cr", |_| Ok(Terminal::LineBreak(Bounds::RUN)));
        registry.register("tab", |_| Ok(Terminal::Tab(Bounds::RUN)));
        registry.register("word", |_| Ok(Terminal::Word(Bounds::RUN)));
        registry.register("empty", |_| Ok(Terminal::Empty));
        registry.register("anyof", |value| {
            lexeme(value).map(|set| Terminal::AnyOf(set, Bounds::ONE))
        });
        registry.register("notblank", |_| Ok(Terminal::NotBlank));
        registry
    }

    /// Register (or replace) a class, returning the previous constructor.
    pub fn register(
        &mut self,
        class: impl Into<SmolStr>,
        ctor: TerminalCtor,
    ) -> Option<TerminalCtor> {
        self.ctors.insert(class.into(), ctor)
    }

    /// Look up a class. `None` means "no matcher".
    pub fn resolve(&self, class: &str) -> Option<TerminalCtor> {
        self.ctors.get(class).copied()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.ctors.contains_key(class)
    }

    /// Registered class names, sorted.
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.ctors.keys().map(SmolStr::as_str).collect();
        classes.sort_unstable();
        classes
    }
}

fn lexeme(value: Option<&str>) -> Result<SmolStr, String> {
    match value {
        Some(value) if !value.is_empty() => Ok(SmolStr::new(value)),
        _ => Err("requires a non-empty value".to_string()),
    }
}
