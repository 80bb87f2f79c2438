//! Leaf matchers that test a stream position.
//!
//! Every terminal is a pure function of `(stream, position)`: it never looks
//! past its own greedy run and never has side effects. Run terminals carry
//! [`Bounds`] so a grammar can cap a run or make it optional.

use std::fmt;

use smol_str::SmolStr;

use crate::base::CharStream;

/// How many characters a run terminal may consume.
///
/// `min` of zero lets the terminal match nothing, which makes an element
/// optional without an `empty` alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    /// One or more characters, as long as the class holds.
    pub const RUN: Bounds = Bounds {
        min: 1,
        max: usize::MAX,
    };

    /// Exactly one character.
    pub const ONE: Bounds = Bounds { min: 1, max: 1 };

    pub fn new(min: usize, max: usize) -> Result<Self, String> {
        if max == 0 {
            return Err("max must be at least 1".to_string());
        }
        if min > max {
            return Err(format!("min {min} is greater than max {max}"));
        }
        Ok(Self { min, max })
    }

    /// Replace whichever limits are given, keeping the others.
    pub fn narrowed(self, min: Option<usize>, max: Option<usize>) -> Result<Self, String> {
        Self::new(min.unwrap_or(self.min), max.unwrap_or(self.max))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::RUN
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (1, usize::MAX) => Ok(()),
            (min, usize::MAX) => write!(f, "{{{min},}}"),
            (min, max) => write!(f, "{{{min},{max}}}"),
        }
    }
}

/// A terminal matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// Exact multi-character lexeme (`token`).
    Token(SmolStr),
    /// Exact multi-character lexeme (`literal`).
    Literal(SmolStr),
    /// Run of ASCII digits.
    Number(Bounds),
    /// Run of non-control whitespace.
    Whitespace(Bounds),
    /// Run of `\r` / `\n`.
    LineBreak(Bounds),
    /// Run of tab characters.
    Tab(Bounds),
    /// Run of letters, where anything outside ASCII counts as a letter.
    Word(Bounds),
    /// Always matches, consuming nothing.
    Empty,
    /// Characters out of the set; one unless the bounds widen it.
    AnyOf(SmolStr, Bounds),
    /// One character that isn't whitespace.
    NotBlank,
}

impl Terminal {
    /// Test the stream at `pos`, returning the match length on success.
    pub fn try_match<S: CharStream + ?Sized>(&self, stream: &S, pos: usize) -> Option<usize> {
        match self {
            Terminal::Token(lexeme) | Terminal::Literal(lexeme) => match_lexeme(stream, pos, lexeme),
            Terminal::Number(bounds) => match_run(stream, pos, *bounds, |c| c.is_ascii_digit()),
            Terminal::Whitespace(bounds) => match_run(stream, pos, *bounds, is_blank),
            Terminal::LineBreak(bounds) => {
                match_run(stream, pos, *bounds, |c| c == '\n' || c == '\r')
            }
            Terminal::Tab(bounds) => match_run(stream, pos, *bounds, |c| c == '\t'),
            Terminal::Word(bounds) => match_run(stream, pos, *bounds, is_letter),
            Terminal::Empty => Some(0),
            Terminal::AnyOf(set, bounds) => match_run(stream, pos, *bounds, |c| set.contains(c)),
            Terminal::NotBlank => match_one(stream, pos, |c| !c.is_whitespace()),
        }
    }

    /// Apply `min`/`max` limits from a grammar element.
    ///
    /// Only run terminals take limits; asking for them on any other class
    /// is an error.
    pub fn with_bounds(self, min: Option<usize>, max: Option<usize>) -> Result<Self, String> {
        if min.is_none() && max.is_none() {
            return Ok(self);
        }
        Ok(match self {
            Terminal::Number(bounds) => Terminal::Number(bounds.narrowed(min, max)?),
            Terminal::Whitespace(bounds) => Terminal::Whitespace(bounds.narrowed(min, max)?),
            Terminal::LineBreak(bounds) => Terminal::LineBreak(bounds.narrowed(min, max)?),
            Terminal::Tab(bounds) => Terminal::Tab(bounds.narrowed(min, max)?),
            Terminal::Word(bounds) => Terminal::Word(bounds.narrowed(min, max)?),
            Terminal::AnyOf(set, bounds) => Terminal::AnyOf(set, bounds.narrowed(min, max)?),
            other => return Err(format!("'{other}' does not take min/max")),
        })
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Terminal::Number(bounds)
            | Terminal::Whitespace(bounds)
            | Terminal::LineBreak(bounds)
            | Terminal::Tab(bounds)
            | Terminal::Word(bounds)
            | Terminal::AnyOf(_, bounds) => Some(*bounds),
            Terminal::Token(_) | Terminal::Literal(_) | Terminal::Empty | Terminal::NotBlank => None,
        }
    }

    /// Terminals that consume nothing are not worth reporting.
    pub fn is_visible_by_default(&self) -> bool {
        !matches!(self, Terminal::Empty)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Token(lexeme) => write!(f, "token({lexeme})"),
            Terminal::Literal(lexeme) => write!(f, "literal({lexeme})"),
            Terminal::Number(bounds) => write!(f, "number{bounds}"),
            Terminal::Whitespace(bounds) => write!(f, "space{bounds}"),
            Terminal::LineBreak(bounds) => write!(f, "cr{bounds}"),
            Terminal::Tab(bounds) => write!(f, "tab{bounds}"),
            Terminal::Word(bounds) => write!(f, "word{bounds}"),
            Terminal::Empty => f.write_str("empty"),
            Terminal::AnyOf(set, bounds) if *bounds == Bounds::ONE => write!(f, "anyof({set})"),
            Terminal::AnyOf(set, bounds) => write!(f, "anyof({set}){bounds}"),
            Terminal::NotBlank => f.write_str("notblank"),
        }
    }
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() && !c.is_control()
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || !c.is_ascii()
}

fn match_lexeme<S: CharStream + ?Sized>(stream: &S, pos: usize, lexeme: &str) -> Option<usize> {
    let mut length = 0;
    for expected in lexeme.chars() {
        if stream.char_at(pos + length) != Some(expected) {
            return None;
        }
        length += 1;
    }
    (length > 0).then_some(length)
}

/// Greedy run of accepted characters, stopping at `bounds.max`.
fn match_run<S, F>(stream: &S, pos: usize, bounds: Bounds, accept: F) -> Option<usize>
where
    S: CharStream + ?Sized,
    F: Fn(char) -> bool,
{
    let mut length = 0;
    while length < bounds.max {
        match stream.char_at(pos + length) {
            Some(c) if accept(c) => length += 1,
            _ => break,
        }
    }
    (length >= bounds.min).then_some(length)
}

fn match_one<S, F>(stream: &S, pos: usize, accept: F) -> Option<usize>
where
    S: CharStream + ?Sized,
    F: Fn(char) -> bool,
{
    stream.char_at(pos).filter(|&c| accept(c)).map(|_| 1)
}
