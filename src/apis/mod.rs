//! Remote lookups against Github and Gitlab.
//!
//! Everything goes through the [`Fetch`] trait so the pipeline can be
//! driven by [`HttpFetcher`] in the binary and by an in-memory table in
//! tests.

mod client;
mod github;
mod gitlab;


use thiserror::Error;

use crate::config::Credentials;
use crate::error::Error;

pub use client::HttpFetcher;
pub use github::{Github, GITHUB_API};
pub use gitlab::Gitlab;

/// Marker Github puts in the body of throttled responses.
const RATE_LIMIT_MARKER: &str = "API rate limit exceeded";

/// A failed GET.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}: not found")]
    NotFound(String),

    #[error("{url}: {status}, body: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("{url}: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }

    pub fn is_rate_limited(&self) -> bool {
        match self {
            FetchError::Status { body, .. } => body.contains(RATE_LIMIT_MARKER),
            _ => false,
        }
    }
}

/// Blocking HTTP GET.
///
/// 200 yields the body, 404 yields [`FetchError::NotFound`], any other
/// status yields [`FetchError::Status`] with the response body attached.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str, credentials: Option<&Credentials>) -> Result<Vec<u8>, FetchError>;
}

/// Turn a failed API call into a run-level error.
pub(crate) fn api_error(what: String, account: &str, project: &str, source: FetchError) -> Error {
    if source.is_rate_limited() {
        return Error::RateLimited;
    }
    Error::Api {
        what,
        account: account.to_string(),
        project: project.to_string(),
        source,
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        url: url.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source,
    })
}

/// Percent-encode everything outside the unreserved set.
pub fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push_str(&format!("%{:02X}", b));
            }
        }
    }
    out
}
