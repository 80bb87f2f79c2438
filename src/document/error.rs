use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("line {line} is out of range (document has {count} lines)")]
    LineOutOfRange { line: usize, count: usize },
}
