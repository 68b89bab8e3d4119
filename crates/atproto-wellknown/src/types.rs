//! Resolver configuration and transport response types

use std::fmt;
use std::time::Duration;

use futures_util::stream::BoxStream;

use crate::error::Result;
use crate::url::URL_MAX_LEN;

const DEFAULT_USER_AGENT: &str = concat!("plcresolve/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`crate::Resolver`]
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Deadline for the whole fetch; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// User-Agent header sent with the request
    pub user_agent: String,
    /// Longest well-known URL accepted, in bytes
    pub max_url_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_url_len: URL_MAX_LEN,
        }
    }
}

/// Stream of body chunks as delivered by the transport
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>>>;

/// Response head plus the unread body
pub struct FetchedBody {
    pub status: u16,
    pub chunks: ChunkStream,
}

impl FetchedBody {
    pub fn new(status: u16, chunks: ChunkStream) -> Self {
        Self { status, chunks }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for FetchedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedBody")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
