//! AT Protocol Well-Known Handle Resolver
//!
//! Resolves a handle (a domain name) to its did:plc identifier by fetching
//! `https://<handle>/.well-known/atproto-did` and validating the body
//! against the did:plc grammar before handing it out.

pub mod buffer;
pub mod cancel;
pub mod did;
pub mod error;
pub mod fetcher;
pub mod resolver;
pub mod types;
pub mod url;

pub use buffer::ResponseBuffer;
pub use cancel::{CancelHandle, Cancellation};
pub use did::{Did, DID_PLC_SPEC_PATTERN, DID_PLC_SPEC_SIZE};
pub use error::{ErrorKind, ResolveError, Result};
pub use fetcher::{Fetcher, HttpTransport, Transport};
pub use resolver::{ResolutionResult, Resolver, ResolverState};
pub use types::{ChunkStream, FetchedBody, ResolverConfig};
pub use url::{normalize_handle, well_known_url, URL_MAX_LEN, WELL_KNOWN_PATH};
