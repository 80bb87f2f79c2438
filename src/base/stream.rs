//! Character streams the grammar matches against.

use std::rc::Rc;
use std::sync::Arc;

/// A random-access, bounded view over characters.
///
/// Positions are character indices, not byte offsets.
pub trait CharStream {
    /// Character at `pos`, or `None` past the end.
    fn char_at(&self, pos: usize) -> Option<char>;

    /// Number of characters in the stream.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `pos` addresses a character.
    fn in_bounds(&self, pos: usize) -> bool {
        pos < self.len()
    }
}

impl<S: CharStream + ?Sized> CharStream for Rc<S> {
    fn char_at(&self, pos: usize) -> Option<char> {
        (**self).char_at(pos)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<S: CharStream + ?Sized> CharStream for Arc<S> {
    fn char_at(&self, pos: usize) -> Option<char> {
        (**self).char_at(pos)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// A stream over an owned snapshot of some text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStream {
    chars: Vec<char>,
}

impl TextStream {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// The characters in `start..end`, clamped to the stream.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }
}

impl From<&str> for TextStream {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl CharStream for TextStream {
    fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn len(&self) -> usize {
        self.chars.len()
    }
}
