//! Worker fault classification.

use std::fmt;

use thiserror::Error;

/// Fault kinds the scheduler survives by stopping the offending slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoverableKind {
    /// The worker was handed a bad argument
    InvalidArgument,
    /// Something the worker depends on is gone
    MissingValue,
    /// The worker hit an unimplemented path
    NotImplemented,
}

impl RecoverableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid argument",
            Self::MissingValue => "missing value",
            Self::NotImplemented => "not implemented",
        }
    }
}

impl fmt::Display for RecoverableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed worker step, classified by the worker that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkFault {
    /// Swallowed by the scheduler; the slot is stopped.
    #[error("{kind}: {message}")]
    Recoverable {
        kind: RecoverableKind,
        message: String,
    },

    /// Propagated to the host; the slot is stopped first.
    #[error("fatal worker fault: {0}")]
    Fatal(String),
}

impl WorkFault {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::recoverable(RecoverableKind::InvalidArgument, message)
    }

    pub fn missing_value(message: impl Into<String>) -> Self {
        Self::recoverable(RecoverableKind::MissingValue, message)
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::recoverable(RecoverableKind::NotImplemented, message)
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }

    fn recoverable(kind: RecoverableKind, message: impl Into<String>) -> Self {
        Self::Recoverable {
            kind,
            message: message.into(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable { .. })
    }
}
