//! did:plc validation
//!
//! A did:plc identifier is exactly 32 characters: the `did:plc:` prefix
//! followed by 24 characters of the base32 alphabet `[a-z2-7]`, accepted here
//! in either case.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{ResolveError, Result};

pub const DID_PLC_PREFIX: &str = "did:plc:";
pub const DID_PLC_SPEC_SIZE: usize = 32;
pub const DID_PLC_SPEC_PATTERN: &str = "^did:plc:[a-zA-Z2-7]{24}$";

static DID_PLC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(DID_PLC_SPEC_PATTERN).unwrap());

/// A validated did:plc identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Did(String);

impl Did {
    /// Validate a completed response body
    pub fn validate(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DID_PLC_SPEC_SIZE {
            return Err(ResolveError::SizeMismatch {
                expected: DID_PLC_SPEC_SIZE,
                actual: bytes.len(),
            });
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|_| ResolveError::Format("response is not valid UTF-8".to_string()))?;

        if !text.starts_with(DID_PLC_PREFIX) {
            return Err(ResolveError::Format(format!(
                "expected {:?} prefix",
                DID_PLC_PREFIX
            )));
        }

        if !DID_PLC_RE.is_match(text) {
            return Err(ResolveError::Format(
                "identifier contains characters outside [a-zA-Z2-7]".to_string(),
            ));
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Did {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::validate(s.as_bytes())
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
