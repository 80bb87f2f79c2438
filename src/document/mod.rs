//! Document: a line buffer that owns per-line formatting.
//!
//! [`Document`] is a cheap, clonable handle. Edits raise a [`BufferEvent`]
//! classified as single-line, multi-line or reload; the parse handler raises
//! [`BufferEvent::Formatted`] once annotations are rebuilt. Observers are held
//! weakly and notified after every internal borrow is released, so an
//! observer may read or edit the document from its callback.

mod error;
mod site;
mod stream;

pub use error::DocumentError;
pub use site::{ErrorSite, TracingSite};
pub use stream::LineStream;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::base::Formatting;


/// Coarse classification of a buffer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferEvent {
    /// Text within one line changed
    SingleLine,
    /// Lines were inserted, removed or replaced
    MultiLine,
    /// The whole buffer was replaced
    Loaded,
    /// Formatting was rebuilt
    Formatted,
}

impl BufferEvent {
    /// Whether this change invalidates formatting.
    pub fn requests_parse(self) -> bool {
        !matches!(self, Self::Formatted)
    }
}

pub trait BufferObserver {
    fn on_buffer_event(&self, document: &Document, event: BufferEvent);
}

/// Handle returned by [`Document::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// One line of text and the annotations attached to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    text: String,
    formatting: Vec<Formatting>,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Annotations in the order they were added.
    pub fn formatting(&self) -> &[Formatting] {
        &self.formatting
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn split_lines(text: &str) -> Vec<Line> {
    text.split('\n')
        .map(|line| Line::new(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

struct Inner {
    lines: RefCell<Vec<Line>>,
    observers: RefCell<Vec<(ObserverId, Weak<dyn BufferObserver>)>>,
    next_observer: Cell<u64>,
    site: Box<dyn ErrorSite>,
}

#[derive(Clone)]
pub struct Document {
    inner: Rc<Inner>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("lines", &self.inner.lines.borrow().len())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

impl Document {
    /// An empty document (one empty line) reporting errors to `tracing`.
    pub fn new() -> Self {
        Self::with_site("", TracingSite)
    }

    pub fn from_text(text: &str) -> Self {
        Self::with_site(text, TracingSite)
    }

    pub fn with_site(text: &str, site: impl ErrorSite + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                lines: RefCell::new(split_lines(text)),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
                site: Box::new(site),
            }),
        }
    }

    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    pub fn line_count(&self) -> usize {
        self.inner.lines.borrow().len()
    }

    pub fn line(&self, index: usize) -> Result<Line, DocumentError> {
        let lines = self.inner.lines.borrow();
        lines
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_range(index, lines.len()))
    }

    pub fn line_text(&self, index: usize) -> Result<String, DocumentError> {
        self.line(index).map(|line| line.text)
    }

    /// Full text, lines joined by `'\n'`.
    pub fn text(&self) -> String {
        let lines = self.inner.lines.borrow();
        let mut text = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&line.text);
        }
        text
    }

    pub fn formatting(&self, index: usize) -> Result<Vec<Formatting>, DocumentError> {
        self.line(index).map(|line| line.formatting)
    }

    /// Snapshot of the text as a character stream.
    pub fn stream(&self) -> LineStream {
        let lines = self.inner.lines.borrow();
        LineStream::from_lines(lines.iter().map(Line::text))
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Replace everything and raise [`BufferEvent::Loaded`].
    pub fn load(&self, text: &str) {
        *self.inner.lines.borrow_mut() = split_lines(text);
        self.raise(BufferEvent::Loaded);
    }

    /// Replace everything as an edit and raise [`BufferEvent::MultiLine`].
    pub fn set_text(&self, text: &str) {
        *self.inner.lines.borrow_mut() = split_lines(text);
        self.raise(BufferEvent::MultiLine);
    }

    /// Replace one line's text. Text containing line breaks splices in
    /// several lines and counts as a multi-line edit.
    pub fn set_line(&self, index: usize, text: &str) -> Result<(), DocumentError> {
        let event = {
            let mut lines = self.inner.lines.borrow_mut();
            let count = lines.len();
            if index >= count {
                return Err(out_of_range(index, count));
            }
            let mut replacement = split_lines(text);
            if replacement.len() == 1 {
                lines[index] = replacement.remove(0);
                BufferEvent::SingleLine
            } else {
                lines.splice(index..=index, replacement);
                BufferEvent::MultiLine
            }
        };
        self.raise(event);
        Ok(())
    }

    /// Insert a line before `index`; `index == line_count()` appends.
    pub fn insert_line(&self, index: usize, text: &str) -> Result<(), DocumentError> {
        {
            let mut lines = self.inner.lines.borrow_mut();
            let count = lines.len();
            if index > count {
                return Err(out_of_range(index, count));
            }
            lines.splice(index..index, split_lines(text));
        }
        self.raise(BufferEvent::MultiLine);
        Ok(())
    }

    /// Remove a line. The document always keeps at least one line.
    pub fn remove_line(&self, index: usize) -> Result<(), DocumentError> {
        {
            let mut lines = self.inner.lines.borrow_mut();
            let count = lines.len();
            if index >= count {
                return Err(out_of_range(index, count));
            }
            lines.remove(index);
            if lines.is_empty() {
                lines.push(Line::default());
            }
        }
        self.raise(BufferEvent::MultiLine);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------

    pub fn clear_formatting(&self) {
        for line in self.inner.lines.borrow_mut().iter_mut() {
            line.formatting.clear();
        }
    }

    pub fn add_formatting(
        &self,
        index: usize,
        formatting: impl Into<Formatting>,
    ) -> Result<(), DocumentError> {
        let mut lines = self.inner.lines.borrow_mut();
        let count = lines.len();
        let line = lines
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, count))?;
        line.formatting.push(formatting.into());
        Ok(())
    }

    pub fn has_formatting(&self) -> bool {
        self.inner
            .lines
            .borrow()
            .iter()
            .any(|line| !line.formatting.is_empty())
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn subscribe<O: BufferObserver + 'static>(&self, observer: &Rc<O>) -> ObserverId {
        let weak = Rc::downgrade(observer);
        let weak: Weak<dyn BufferObserver> = weak;
        self.subscribe_weak(weak)
    }

    pub fn subscribe_weak(&self, observer: Weak<dyn BufferObserver>) -> ObserverId {
        let id = ObserverId(self.inner.next_observer.get());
        self.inner.next_observer.set(id.0 + 1);
        self.inner.observers.borrow_mut().push((id, observer));
        id
    }

    /// Returns `false` if `id` wasn't subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Live observers. Dropped ones are pruned on the next event.
    pub fn observer_count(&self) -> usize {
        self.inner
            .observers
            .borrow()
            .iter()
            .filter(|(_, observer)| observer.strong_count() > 0)
            .count()
    }

    /// Notify every live observer of `event`.
    pub fn raise(&self, event: BufferEvent) {
        let live: Vec<Rc<dyn BufferObserver>> = {
            let mut observers = self.inner.observers.borrow_mut();
            observers.retain(|(_, observer)| observer.strong_count() > 0);
            observers
                .iter()
                .filter_map(|(_, observer)| observer.upgrade())
                .collect()
        };
        tracing::trace!(?event, observers = live.len(), "buffer event");
        for observer in live {
            observer.on_buffer_event(self, event);
        }
    }

    pub fn log_error(&self, source: &str, message: &str) {
        self.inner.site.log_error(source, message);
    }
}

fn out_of_range(line: usize, count: usize) -> DocumentError {
    DocumentError::LineOutOfRange { line, count }
}
