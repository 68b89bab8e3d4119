//! Streaming HTTPS fetch of the well-known document

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::{debug, warn};

use crate::buffer::ResponseBuffer;
use crate::cancel::Cancellation;
use crate::error::{ResolveError, Result};
use crate::types::FetchedBody;

/// Issues a single GET and hands back the status plus an unread body stream.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn open(&self, url: &str, user_agent: &str) -> Result<FetchedBody>;
}

/// reqwest-backed transport (TLS, redirects and pooling are left to reqwest)
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&self, url: &str, user_agent: &str) -> Result<FetchedBody> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status().as_u16();
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(ResolveError::from))
            .boxed();

        Ok(FetchedBody::new(status, chunks))
    }
}

/// Drives one transport request into a [`ResponseBuffer`]
pub struct Fetcher<T> {
    transport: T,
    user_agent: String,
    timeout: Option<Duration>,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, user_agent: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            transport,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Fetch the full body of `url`.
    ///
    /// Non-2xx statuses fail with [`ResolveError::HttpStatus`] without reading
    /// the body. Cancellation or an expired deadline drops the in-flight
    /// buffer and fails with [`ResolveError::Cancelled`].
    pub async fn fetch(&self, url: &str, cancel: &Cancellation) -> Result<ResponseBuffer> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let deadline = async {
            match self.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(url, "Fetch cancelled");
                Err(ResolveError::Cancelled)
            }
            _ = deadline => {
                debug!(url, timeout = ?self.timeout, "Fetch deadline expired");
                Err(ResolveError::Cancelled)
            }
            result = self.receive(url) => result,
        }
    }

    async fn receive(&self, url: &str) -> Result<ResponseBuffer> {
        let body = self.transport.open(url, &self.user_agent).await?;

        if !body.is_success() {
            warn!(url, status = body.status, "Well-known endpoint returned error status");
            return Err(ResolveError::HttpStatus(body.status));
        }

        let mut chunks = body.chunks;
        let mut buffer = ResponseBuffer::new();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            buffer.append(&chunk)?;
            debug!(chunk = chunk.len(), total = buffer.len(), "Received chunk");
        }

        debug!(url, size = buffer.len(), "Fetched well-known document");
        Ok(buffer)
    }
}
