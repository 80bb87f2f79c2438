//! Formatting annotations attached to document lines.

use std::fmt;

use smol_str::SmolStr;

/// Semantic color/category of an annotation.
///
/// Grammar-assigned categories are `0` and up; negative values are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColorIndex(pub i32);

impl ColorIndex {
    /// Plain text, the category of elements without an explicit color.
    pub const PLAIN: ColorIndex = ColorIndex(0);
    /// Parse error marker.
    pub const ERROR: ColorIndex = ColorIndex(-4);

    /// Check if this is a reserved (negative) category
    pub fn is_reserved(self) -> bool {
        self.0 < 0
    }
}

impl From<u16> for ColorIndex {
    fn from(value: u16) -> Self {
        Self(i32::from(value))
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A colored span, relative to the start of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRange {
    pub offset: usize,
    pub length: usize,
    pub color: ColorIndex,
}

impl ColorRange {
    pub fn new(offset: usize, length: usize, color: ColorIndex) -> Self {
        Self {
            offset,
            length,
            color,
        }
    }
}

/// A colored span that also remembers which grammar state produced it.
///
/// Used for matches with semantic identity, e.g. hyperlink-like words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordRange {
    pub offset: usize,
    pub length: usize,
    pub color: ColorIndex,
    /// Name of the grammar state that matched
    pub state: SmolStr,
}

/// One formatting annotation on a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formatting {
    Color(ColorRange),
    Word(WordRange),
}

impl Formatting {
    pub fn offset(&self) -> usize {
        match self {
            Formatting::Color(range) => range.offset,
            Formatting::Word(word) => word.offset,
        }
    }

    pub fn length(&self) -> usize {
        match self {
            Formatting::Color(range) => range.length,
            Formatting::Word(word) => word.length,
        }
    }

    pub fn color(&self) -> ColorIndex {
        match self {
            Formatting::Color(range) => range.color,
            Formatting::Word(word) => word.color,
        }
    }

    /// Check if this annotation marks a parse error
    pub fn is_error(&self) -> bool {
        self.color().is_reserved()
    }

    pub fn as_word(&self) -> Option<&WordRange> {
        match self {
            Formatting::Word(word) => Some(word),
            Formatting::Color(_) => None,
        }
    }

    /// `(offset, length, color)` triple, handy for comparisons.
    pub fn as_tuple(&self) -> (usize, usize, i32) {
        (self.offset(), self.length(), self.color().0)
    }
}

impl From<ColorRange> for Formatting {
    fn from(range: ColorRange) -> Self {
        Formatting::Color(range)
    }
}

impl From<WordRange> for Formatting {
    fn from(word: WordRange) -> Self {
        Formatting::Word(word)
    }
}
