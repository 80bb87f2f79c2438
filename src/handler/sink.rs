//! Parse events → line formatting.

use std::rc::Rc;

use crate::base::{CharStream, ColorIndex, ColorRange, Formatting, WordRange};
use crate::document::{Document, LineStream};
use crate::grammar::ProdElem;
use crate::parser::{MemoryElem, ParseEvents, ParseFault};

/// Writes parse results onto the document the stream was taken from.
pub struct FormatSink {
    document: Document,
    stream: Rc<LineStream>,
    error_color: ColorIndex,
}

impl FormatSink {
    /// Error markers must stay distinguishable from grammar categories, so a
    /// non-reserved `error_color` is replaced by [`ColorIndex::ERROR`].
    pub fn new(document: Document, stream: Rc<LineStream>, error_color: ColorIndex) -> Self {
        let error_color = if error_color.is_reserved() {
            error_color
        } else {
            tracing::warn!(%error_color, "error color is not reserved, using the default");
            ColorIndex::ERROR
        };
        Self {
            document,
            stream,
            error_color,
        }
    }

    fn locate(&self, offset: usize) -> Result<(usize, usize), ParseFault> {
        self.stream.seek_line(offset).ok_or_else(|| {
            ParseFault::listener(format!(
                "offset {offset} is outside the document ({} chars)",
                self.stream.len()
            ))
        })
    }

    fn add(&self, line: usize, formatting: Formatting) -> Result<(), ParseFault> {
        self.document
            .add_formatting(line, formatting)
            .map_err(|err| ParseFault::listener(err.to_string()))
    }
}

impl ParseEvents for FormatSink {
    fn on_match(&mut self, memory: &MemoryElem<'_>) -> Result<(), ParseFault> {
        let (line, column) = self.locate(memory.offset)?;
        let formatting = match memory.state {
            Some(state) if memory.is_word() => Formatting::Word(WordRange {
                offset: column,
                length: memory.length,
                color: memory.color(),
                state: state.into(),
            }),
            _ => ColorRange::new(column, memory.length, memory.color()).into(),
        };
        tracing::trace!(line, column, length = memory.length, "annotation");
        self.add(line, formatting)
    }

    fn on_parser_error(&mut self, _failed: &ProdElem, position: usize) -> Result<(), ParseFault> {
        let (line, column) = if self.stream.in_bounds(position) {
            self.locate(position)?
        } else {
            // Past the end: last character of the last line.
            let last = self.stream.line_count().saturating_sub(1);
            let len = self.stream.line_len(last).unwrap_or(0);
            (last, len.saturating_sub(1))
        };
        self.add(line, ColorRange::new(column, 1, self.error_color).into())
    }

    fn on_parser_exception(&mut self, fault: &ParseFault, position: usize) {
        self.document
            .log_error("parser", &format!("{fault} (at offset {position})"));
    }
}
