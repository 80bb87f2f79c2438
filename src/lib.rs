//! # parsework-base
//!
//! Incremental background parsing for editable text: a grammar-driven,
//! resumable parser that rebuilds per-line formatting after every edit, run
//! under a cooperative round-robin scheduler so the editing surface never
//! blocks.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! handler   → ParseHandler: document edits → queued reparse → line formatting
//!   ↓
//! work      → RoundRobin scheduler, WorkPlace slots, Worker trait
//!   ↓
//! document  → Line buffer, formatting store, change observers
//!   ↓
//! parser    → ParseIterator, ParseEvents listener interface
//!   ↓
//! grammar   → States, productions, terminal matchers, JSON definitions
//!   ↓
//! base      → Primitives (CharStream, ColorIndex, Formatting)
//! ```

// ============================================================================
// MODULES (dependency order: base → grammar → parser → document → work → handler)
// ============================================================================

/// Foundation types: character streams and formatting annotations
pub mod base;

/// Grammar model: states, productions, terminals, builder, registries
pub mod grammar;

/// Parser: resumable ordered-choice matching over a character stream
pub mod parser;

/// Document: line buffer with per-line formatting and change notifications
pub mod document;

/// Work: cooperative single-threaded round-robin scheduling
pub mod work;

/// Handler: keeps a document's formatting in sync with its text
pub mod handler;

// Re-export the types most hosts need
pub use base::{CharStream, ColorIndex, ColorRange, Formatting, TextStream, WordRange};
pub use document::{BufferEvent, BufferObserver, Document, ErrorSite};
pub use grammar::{ElemSpec, Grammar, GrammarBuilder, GrammarError, GrammarRegistry};
pub use handler::{HandlerError, ParseHandler, ParseOptions};
pub use parser::{ParseEvents, ParseIterator, ParseStep};
pub use work::{RoundRobin, SchedulerOptions, Step, WorkFault, Worker};
