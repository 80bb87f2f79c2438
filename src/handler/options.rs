//! Parse handler options

use std::time::Duration;

use crate::base::ColorIndex;

/// Tuning for background parsing of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest nonterminal nesting the parser will expand
    pub max_depth: usize,
    /// Parser steps per scheduler step
    pub slice_budget: usize,
    /// Delay between scheduler steps of one parse
    pub step_interval: Duration,
    /// Category used for parse error markers. Must be reserved (negative);
    /// anything else falls back to [`ColorIndex::ERROR`].
    pub error_color: ColorIndex,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 30,
            slice_budget: 32,
            step_interval: Duration::ZERO,
            error_color: ColorIndex::ERROR,
        }
    }
}

impl ParseOptions {
    /// Slice budget, never less than one step
    pub fn steps_per_slice(&self) -> usize {
        self.slice_budget.max(1)
    }
}
