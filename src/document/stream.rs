//! Flattened snapshot of a document for one parse run.

use crate::base::CharStream;

/// The document's lines joined by `'\n'`, plus where each line starts.
///
/// Taken once per run; later edits to the document don't show through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineStream {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl LineStream {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut chars = Vec::new();
        let mut line_starts = Vec::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                chars.push('\n');
            }
            line_starts.push(chars.len());
            chars.extend(line.chars());
        }
        if line_starts.is_empty() {
            line_starts.push(0);
        }
        Self { chars, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Length of `line` in chars, excluding the separator.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.chars.len(), |next| next - 1);
        Some(end - start)
    }

    /// Map an absolute offset to `(line, column)`.
    ///
    /// A separator belongs to the line it ends. The end-of-stream offset maps
    /// to the end of the last line; anything beyond is `None`.
    pub fn seek_line(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.chars.len() {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Some((line, offset - self.line_starts[line]))
    }
}

impl CharStream for LineStream {
    fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn len(&self) -> usize {
        self.chars.len()
    }
}
