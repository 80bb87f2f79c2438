//! The scheduled unit of one full reparse.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::document::{BufferEvent, Document, LineStream};
use crate::grammar::Grammar;
use crate::parser::{ParseIterator, ParseStep};
use crate::work::{Step, WorkFault, Worker};

use super::options::ParseOptions;
use super::sink::FormatSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Clear,
    Parse,
    Notify,
    Done,
}

/// Clears the document's formatting, parses it a slice at a time, then
/// raises [`BufferEvent::Formatted`].
///
/// The text is snapshotted when the worker is created. A cancelled worker
/// finishes on its next step without touching the document.
pub struct ParseWorker {
    document: Document,
    iterator: ParseIterator<Rc<LineStream>, FormatSink>,
    phase: Phase,
    steps_per_slice: usize,
    interval: Duration,
    cancel: CancellationToken,
}

impl ParseWorker {
    pub fn new(
        grammar: Arc<Grammar>,
        document: Document,
        options: &ParseOptions,
        cancel: CancellationToken,
    ) -> Self {
        let stream = Rc::new(document.stream());
        let sink = FormatSink::new(document.clone(), Rc::clone(&stream), options.error_color);
        let iterator = ParseIterator::new(grammar, stream, sink).with_max_depth(options.max_depth);
        Self {
            document,
            iterator,
            phase: Phase::Clear,
            steps_per_slice: options.steps_per_slice(),
            interval: options.step_interval,
            cancel,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    fn parse_slice(&mut self) -> ParseStep {
        for _ in 0..self.steps_per_slice {
            match self.iterator.step() {
                ParseStep::Continue => {}
                done => return done,
            }
        }
        ParseStep::Continue
    }
}

impl Worker for ParseWorker {
    fn step(&mut self) -> Result<Step, WorkFault> {
        if self.cancel.is_cancelled() {
            tracing::debug!("parse cancelled");
            self.phase = Phase::Done;
            return Ok(Step::Finished);
        }

        match self.phase {
            Phase::Clear => {
                self.document.clear_formatting();
                self.phase = Phase::Parse;
                Ok(Step::Continue(self.interval))
            }
            Phase::Parse => {
                match self.parse_slice() {
                    ParseStep::Continue => {}
                    ParseStep::Finished => {
                        tracing::debug!(position = self.iterator.position(), "parse finished");
                        self.phase = Phase::Notify;
                    }
                    ParseStep::Failed => {
                        tracing::debug!(position = self.iterator.position(), "parse aborted");
                        self.phase = Phase::Notify;
                    }
                }
                Ok(Step::Continue(self.interval))
            }
            Phase::Notify => {
                self.phase = Phase::Done;
                self.document.raise(BufferEvent::Formatted);
                Ok(Step::Finished)
            }
            Phase::Done => Ok(Step::Finished),
        }
    }
}
