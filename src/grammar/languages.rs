//! Language registry: one shared grammar per language name.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{Grammar, GrammarError};

/// Maps language names and file extensions to shared grammars.
#[derive(Debug, Clone, Default)]
pub struct GrammarRegistry {
    grammars: FxHashMap<SmolStr, Arc<Grammar>>,
    /// Lowercased extension → language name
    extensions: FxHashMap<SmolStr, SmolStr>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grammar under its own name.
    ///
    /// Grammar names are unique; a second grammar with the same name is rejected.
    /// A later registration may take over an extension.
    pub fn register(
        &mut self,
        grammar: Grammar,
        extensions: &[&str],
    ) -> Result<Arc<Grammar>, GrammarError> {
        let name = SmolStr::new(grammar.name());
        if self.grammars.contains_key(&name) {
            return Err(GrammarError::DuplicateGrammar(name));
        }
        let grammar = Arc::new(grammar);
        for extension in extensions {
            self.extensions
                .insert(normalize_extension(extension), name.clone());
        }
        self.grammars.insert(name, Arc::clone(&grammar));
        Ok(grammar)
    }

    /// Build and register a JSON definition, using its declared extensions.
    #[cfg(feature = "definitions")]
    pub fn register_def(&mut self, def: super::GrammarDef) -> Result<Arc<Grammar>, GrammarError> {
        let extensions = def.extensions.clone();
        let grammar = def.build()?;
        let extensions: Vec<&str> = extensions.iter().map(SmolStr::as_str).collect();
        self.register(grammar, &extensions)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Grammar>> {
        self.grammars.get(name).cloned()
    }

    pub fn for_extension(&self, extension: &str) -> Option<Arc<Grammar>> {
        let name = self.extensions.get(&normalize_extension(extension))?;
        self.get(name)
    }

    pub fn for_path(&self, path: &Path) -> Option<Arc<Grammar>> {
        let extension = path.extension()?.to_str()?;
        self.for_extension(extension)
    }

    /// Registered language names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grammars.keys().map(SmolStr::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

fn normalize_extension(extension: &str) -> SmolStr {
    SmolStr::new(extension.trim_start_matches('.').to_ascii_lowercase())
}
