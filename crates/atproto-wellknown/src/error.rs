//! Error types for well-known handle resolution

use std::fmt;

/// Coarse classification of a [`ResolveError`], for callers that only
/// need to branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidHandle,
    UrlTooLong,
    Transport,
    HttpStatus,
    AllocationFailure,
    SizeMismatch,
    Format,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Handle is empty or cannot sit in a URL authority unencoded
    InvalidHandle(String),
    UrlTooLong { len: usize, max: usize },
    /// DNS, TLS or connection fault; carries the client's message
    Transport(String),
    HttpStatus(u16),
    AllocationFailure { requested: usize },
    SizeMismatch { expected: usize, actual: usize },
    Format(String),
    Cancelled,
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::InvalidHandle(_) => ErrorKind::InvalidHandle,
            ResolveError::UrlTooLong { .. } => ErrorKind::UrlTooLong,
            ResolveError::Transport(_) => ErrorKind::Transport,
            ResolveError::HttpStatus(_) => ErrorKind::HttpStatus,
            ResolveError::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            ResolveError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            ResolveError::Format(_) => ErrorKind::Format,
            ResolveError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidHandle(msg) => write!(f, "Invalid handle: {}", msg),
            ResolveError::UrlTooLong { len, max } => write!(
                f,
                "Well-known URL too long: {} bytes (limit {})",
                len, max
            ),
            ResolveError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ResolveError::HttpStatus(code) => write!(f, "HTTP status error: {}", code),
            ResolveError::AllocationFailure { requested } => write!(
                f,
                "Failed to allocate {} bytes for response data",
                requested
            ),
            ResolveError::SizeMismatch { expected, actual } => write!(
                f,
                "Response is not the correct size ({}): {}",
                expected, actual
            ),
            ResolveError::Format(msg) => write!(f, "Malformed did:plc identifier: {}", msg),
            ResolveError::Cancelled => write!(f, "Resolution cancelled"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
