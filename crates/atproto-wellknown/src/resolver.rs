//! Resolution state machine
//!
//! One resolution walks `Idle → Building → Fetching → Validating` and ends
//! in `Resolved` or `Failed`. Transitions only move forward; any stage may
//! jump straight to `Failed`.

use tracing::{debug, warn};

use crate::buffer::ResponseBuffer;
use crate::cancel::Cancellation;
use crate::did::Did;
use crate::error::{ResolveError, Result};
use crate::fetcher::{Fetcher, HttpTransport, Transport};
use crate::types::ResolverConfig;
use crate::url::well_known_url;

/// Outcome of one resolution
pub type ResolutionResult = Result<Did>;

/// Terminal state of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverState {
    Resolved(Did),
    Failed(ResolveError),
}

impl ResolverState {
    pub fn name(&self) -> &'static str {
        match self {
            ResolverState::Resolved(_) => "resolved",
            ResolverState::Failed(_) => "failed",
        }
    }

    pub fn into_result(self) -> ResolutionResult {
        match self {
            ResolverState::Resolved(did) => Ok(did),
            ResolverState::Failed(err) => Err(err),
        }
    }
}

impl From<ResolutionResult> for ResolverState {
    fn from(result: ResolutionResult) -> Self {
        match result {
            Ok(did) => ResolverState::Resolved(did),
            Err(err) => ResolverState::Failed(err),
        }
    }
}

/// In-progress stages, each owning the data the next one consumes
enum Stage {
    Idle,
    Building,
    Fetching(String),
    Validating(ResponseBuffer),
    Done(ResolverState),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Building => "building",
            Stage::Fetching(_) => "fetching",
            Stage::Validating(_) => "validating",
            Stage::Done(state) => state.name(),
        }
    }
}

/// Resolves handles to did:plc identifiers via `/.well-known/atproto-did`.
///
/// Holds no per-resolution state, so a single instance may serve many
/// concurrent resolutions.
pub struct Resolver<T = HttpTransport> {
    fetcher: Fetcher<T>,
    max_url_len: usize,
}

impl Resolver<HttpTransport> {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl Default for Resolver<HttpTransport> {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl<T: Transport> Resolver<T> {
    pub fn with_transport(config: ResolverConfig, transport: T) -> Self {
        Self {
            fetcher: Fetcher::new(transport, config.user_agent, config.timeout),
            max_url_len: config.max_url_len,
        }
    }

    /// Resolve a handle to its DID
    pub async fn resolve(&self, handle: &str) -> ResolutionResult {
        self.resolve_with_cancel(handle, &Cancellation::none()).await
    }

    pub async fn resolve_with_cancel(
        &self,
        handle: &str,
        cancel: &Cancellation,
    ) -> ResolutionResult {
        self.run(handle, cancel).await.into_result()
    }

    /// Drive one resolution to its terminal state
    pub async fn run(&self, handle: &str, cancel: &Cancellation) -> ResolverState {
        let mut stage = Stage::Idle;
        loop {
            stage = match stage {
                Stage::Idle => Stage::Building,
                Stage::Building => match well_known_url(handle, self.max_url_len) {
                    Ok(url) => Stage::Fetching(url),
                    Err(err) => Stage::Done(ResolverState::Failed(err)),
                },
                Stage::Fetching(url) => match self.fetcher.fetch(&url, cancel).await {
                    Ok(buffer) => Stage::Validating(buffer),
                    Err(err) => Stage::Done(ResolverState::Failed(err)),
                },
                // The buffer is consumed here whatever the outcome
                Stage::Validating(buffer) => {
                    Stage::Done(Did::validate(buffer.as_slice()).into())
                }
                Stage::Done(state) => return self.finish(handle, state),
            };
            debug!(handle, stage = stage.name(), "Resolver transition");
        }
    }

    fn finish(&self, handle: &str, state: ResolverState) -> ResolverState {
        match &state {
            ResolverState::Resolved(did) => debug!(handle, did = %did, "Resolved handle"),
            ResolverState::Failed(err) => {
                warn!(handle, kind = ?err.kind(), error = %err, "Handle resolution failed")
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FetchedBody;
    use async_trait::async_trait;
    use futures_util::{stream, StreamExt};

    struct Fixed(u16, &'static [u8]);

    #[async_trait]
    impl Transport for Fixed {
        async fn open(&self, _url: &str, _user_agent: &str) -> Result<FetchedBody> {
            let chunks = stream::iter(vec![Ok(self.1.to_vec())]).boxed();
            Ok(FetchedBody::new(self.0, chunks))
        }
    }

    fn resolver(status: u16, body: &'static [u8]) -> Resolver<Fixed> {
        Resolver::with_transport(ResolverConfig::default(), Fixed(status, body))
    }

    #[test]
    fn test_state_round_trips_result() {
        let failed = ResolverState::from(Err(ResolveError::Cancelled));
        assert_eq!(failed.name(), "failed");
        assert_eq!(failed.into_result(), Err(ResolveError::Cancelled));
    }

    #[tokio::test]
    async fn test_resolves_valid_body() {
        let state = resolver(200, b"did:plc:ewvi7nxzyoun6zhxrhs64oiz")
            .run("alice.example", &Cancellation::none())
            .await;
        assert_eq!(state.name(), "resolved");
        let did = state.into_result().unwrap();
        assert_eq!(did.as_str(), "did:plc:ewvi7nxzyoun6zhxrhs64oiz");
    }

    #[tokio::test]
    async fn test_building_failure_never_fetches() {
        struct Unreachable;

        #[async_trait]
        impl Transport for Unreachable {
            async fn open(&self, url: &str, _user_agent: &str) -> Result<FetchedBody> {
                panic!("unexpected fetch of {url}");
            }
        }

        let resolver = Resolver::with_transport(ResolverConfig::default(), Unreachable);
        let err = resolver.resolve("bad handle").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidHandle(_)));
    }

    #[tokio::test]
    async fn test_validation_failure() {
        let err = resolver(200, b"not a did")
            .resolve("alice.example")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::SizeMismatch {
                expected: 32,
                actual: 9
            }
        );
    }
}
