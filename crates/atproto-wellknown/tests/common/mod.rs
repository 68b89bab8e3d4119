#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atproto_wellknown::{FetchedBody, Result, Transport};
use futures_util::{stream, StreamExt};

pub const VALID_DID: &[u8] = b"did:plc:ewvi7nxzyoun6zhxrhs64oiz";

/// Replies with a fixed status and chunk sequence, recording requested URLs
pub struct Scripted {
    status: u16,
    chunks: Vec<Vec<u8>>,
    pub urls: Arc<Mutex<Vec<String>>>,
}

impl Scripted {
    pub fn new(status: u16, chunks: &[&[u8]]) -> Self {
        Self {
            status,
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn open(&self, url: &str, _user_agent: &str) -> Result<FetchedBody> {
        self.urls.lock().unwrap().push(url.to_string());
        let chunks: Vec<Result<Vec<u8>>> = self.chunks.iter().cloned().map(Ok).collect();
        Ok(FetchedBody::new(self.status, stream::iter(chunks).boxed()))
    }
}

struct ReleaseFlag(Arc<AtomicBool>);

impl Drop for ReleaseFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Sends a first chunk and then never finishes the body; `released` flips
/// once the body stream has been dropped.
pub struct Stalled {
    pub released: Arc<AtomicBool>,
}

impl Stalled {
    pub fn new() -> Self {
        Self {
            released: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl Transport for Stalled {
    async fn open(&self, _url: &str, _user_agent: &str) -> Result<FetchedBody> {
        let flag = ReleaseFlag(self.released.clone());
        let chunks = stream::once(async { Ok(b"did:p".to_vec()) })
            .chain(stream::pending::<Result<Vec<u8>>>())
            .map(move |chunk| {
                let _held = &flag;
                chunk
            })
            .boxed();
        Ok(FetchedBody::new(200, chunks))
    }
}
