//! Handler: keeps one document's formatting in sync with its text.
//!
//! A [`ParseHandler`] observes a [`Document`]. Every edit (single-line,
//! multi-line or reload) queues a fresh [`ParseWorker`] on the handler's own
//! [`WorkPlace`], replacing whatever parse was still pending, so at most one
//! parse per document is ever in flight. The worker clears the document's
//! formatting, rebuilds it through a [`FormatSink`], and raises
//! [`BufferEvent::Formatted`] when it is done. That event never requeues.
//!
//! ```text
//! Document ──edit──▶ ParseHandler ──queue──▶ RoundRobin
//!    ▲                                           │ step
//!    └──── annotations ◀── FormatSink ◀── ParseWorker
//! ```

mod options;
mod sink;
mod worker;

pub use options::ParseOptions;
pub use sink::FormatSink;
pub use worker::ParseWorker;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::document::{BufferEvent, BufferObserver, Document, ObserverId};
use crate::grammar::{Grammar, GrammarError, GrammarRegistry};
use crate::work::{RoundRobin, WorkPlace, WorkerStatus};


#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("parse handler needs a {0}")]
    MissingDependency(&'static str),

    #[error("no grammar registered for language '{0}'")]
    UnknownLanguage(String),

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

struct HandlerCore {
    document: Document,
    grammar: Arc<Grammar>,
    options: ParseOptions,
    workplace: WorkPlace,
    enabled: Cell<bool>,
    cancel: CancellationToken,
}

impl HandlerCore {
    fn queue_parse(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        let worker = ParseWorker::new(
            Arc::clone(&self.grammar),
            self.document.clone(),
            &self.options,
            self.cancel.child_token(),
        );
        self.workplace.queue(worker, Duration::ZERO);
    }
}

impl BufferObserver for HandlerCore {
    fn on_buffer_event(&self, _document: &Document, event: BufferEvent) {
        if self.enabled.get() && event.requests_parse() {
            tracing::trace!(?event, grammar = %self.grammar.name(), "requeue parse");
            self.queue_parse();
        }
    }
}

/// Owns background parsing for one document.
///
/// Parsing starts enabled, but nothing is parsed until the document changes
/// or [`reparse`](Self::reparse) is called. Dropping the handler disposes it.
pub struct ParseHandler {
    core: Rc<HandlerCore>,
    subscription: Option<ObserverId>,
}

impl ParseHandler {
    pub fn builder() -> ParseHandlerBuilder {
        ParseHandlerBuilder::default()
    }

    pub fn new(scheduler: &RoundRobin, document: &Document, grammar: Arc<Grammar>) -> Self {
        Self::with_options(scheduler, document, grammar, ParseOptions::default())
    }

    pub fn with_options(
        scheduler: &RoundRobin,
        document: &Document,
        grammar: Arc<Grammar>,
        options: ParseOptions,
    ) -> Self {
        let workplace = scheduler.workplace(format!("parse:{}", grammar.name()));
        let core = Rc::new(HandlerCore {
            document: document.clone(),
            grammar,
            options,
            workplace,
            enabled: Cell::new(true),
            cancel: CancellationToken::new(),
        });
        let subscription = document.subscribe(&core);
        tracing::debug!(grammar = %core.grammar.name(), "parse handler attached");
        Self {
            core,
            subscription: Some(subscription),
        }
    }

    pub fn document(&self) -> &Document {
        &self.core.document
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.core.grammar
    }

    pub fn options(&self) -> &ParseOptions {
        &self.core.options
    }

    pub fn is_parsing_enabled(&self) -> bool {
        self.core.enabled.get()
    }

    /// Disabling stops any pending parse and clears all formatting;
    /// enabling queues a fresh parse right away.
    pub fn set_parsing_enabled(&self, enabled: bool) {
        if self.is_disposed() {
            return;
        }
        self.core.enabled.set(enabled);
        if enabled {
            self.core.queue_parse();
        } else {
            self.core.workplace.stop();
            self.core.document.clear_formatting();
            self.core.document.raise(BufferEvent::Formatted);
        }
        tracing::debug!(enabled, "parsing toggled");
    }

    /// Queue a fresh parse if parsing is enabled.
    pub fn reparse(&self) {
        if self.core.enabled.get() {
            self.core.queue_parse();
        }
    }

    pub fn status(&self) -> WorkerStatus {
        self.core.workplace.status()
    }

    /// Route a play/pause/stop command to this handler's parse slot.
    pub fn execute(&self, command: Uuid) -> bool {
        self.core.workplace.execute(command)
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.is_none()
    }

    /// Unsubscribe from the document and cancel any pending parse.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        self.core.document.unsubscribe(subscription);
        self.core.workplace.stop();
        self.core.cancel.cancel();
        tracing::debug!(grammar = %self.core.grammar.name(), "parse handler disposed");
    }
}

impl Drop for ParseHandler {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Builder for [`ParseHandler`].
#[derive(Default)]
pub struct ParseHandlerBuilder {
    scheduler: Option<RoundRobin>,
    document: Option<Document>,
    grammar: Option<Result<Arc<Grammar>, HandlerError>>,
    options: ParseOptions,
}

impl ParseHandlerBuilder {
    pub fn scheduler(mut self, scheduler: &RoundRobin) -> Self {
        self.scheduler = Some(scheduler.clone());
        self
    }

    pub fn document(mut self, document: &Document) -> Self {
        self.document = Some(document.clone());
        self
    }

    pub fn grammar(mut self, grammar: Arc<Grammar>) -> Self {
        self.grammar = Some(Ok(grammar));
        self
    }

    /// Use the grammar registered under `language`.
    pub fn language(mut self, registry: &GrammarRegistry, language: &str) -> Self {
        self.grammar = Some(
            registry
                .get(language)
                .ok_or_else(|| HandlerError::UnknownLanguage(language.to_string())),
        );
        self
    }

    /// Build the grammar from a JSON definition.
    #[cfg(feature = "definitions")]
    pub fn definition(mut self, json: &str) -> Self {
        self.grammar = Some(
            Grammar::from_json_str(json)
                .map(Arc::new)
                .map_err(HandlerError::from),
        );
        self
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<ParseHandler, HandlerError> {
        let scheduler = self
            .scheduler
            .ok_or(HandlerError::MissingDependency("scheduler"))?;
        let document = self
            .document
            .ok_or(HandlerError::MissingDependency("document"))?;
        let grammar = self
            .grammar
            .ok_or(HandlerError::MissingDependency("grammar"))??;
        Ok(ParseHandler::with_options(
            &scheduler,
            &document,
            grammar,
            self.options,
        ))
    }
}
