//! Error types.
//!
//! Two tiers: [`Error`] aborts the whole run, [`SoftError`] is recorded
//! against a single manifest entry and rendered as a comment next to the
//! tuple table.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::apis::FetchError;
use crate::config::{GITHUB_CREDENTIALS_KEY, OFFLINE_KEY};

/// A failure that stops the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected number of fields: {0:?}")]
    FieldCount(String),

    #[error("unexpected replace spec format: {0:?}")]
    ReplaceFormat(String),

    #[error("unexpected version string: {0:?}")]
    Version(String),

    #[error("unexpected {host} package name: {path:?}")]
    PackagePath { host: &'static str, path: String },

    #[error(
        "Github API rate limit exceeded. Please either:\n\
         - set {} environment variable to your Github \"username:personal_access_token\"\n  \
           to let modtuple call Github API using basic authentication.\n  \
           To create a new token, navigate to https://github.com/settings/tokens/new\n  \
           (leave all checkboxes unchecked, modtuple doesn't need any access to your account)\n\
         - set {}=1 or pass \"--offline\" flag to modtuple to disable network access",
        GITHUB_CREDENTIALS_KEY,
        OFFLINE_KEY
    )]
    RateLimited,

    #[error("error getting {what} for {account}/{project}: {source}")]
    Api {
        what: String,
        account: String,
        project: String,
        #[source]
        source: FetchError,
    },

    #[error("error unmarshalling response from {url}: {source}, resp: {body}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("cannot start resolver pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Which comment block a [`SoftError`] is rendered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoftErrorKind {
    UnknownMirror,
    ReplacementMissingCommit,
    ReplacementLocalFilesystem,
    DuplicateProjectAndTag,
    MissingTag,
}

impl SoftErrorKind {
    pub const ALL: [SoftErrorKind; 5] = [
        SoftErrorKind::UnknownMirror,
        SoftErrorKind::ReplacementMissingCommit,
        SoftErrorKind::ReplacementLocalFilesystem,
        SoftErrorKind::DuplicateProjectAndTag,
        SoftErrorKind::MissingTag,
    ];

    /// Comment header printed above the entries of this kind.
    pub fn header(self) -> &'static str {
        match self {
            SoftErrorKind::UnknownMirror => {
                "Mirrors for the following packages are not currently known, please look them up and handle these tuples manually:"
            }
            SoftErrorKind::ReplacementMissingCommit => {
                "The following replacement packages are missing version/commit ID, you may need to symlink them in post-patch:"
            }
            SoftErrorKind::ReplacementLocalFilesystem => {
                "The following replacement packages are referencing a local filesystem path, you may need to symlink them in post-patch:"
            }
            SoftErrorKind::DuplicateProjectAndTag => {
                "The following tuples share project and tag with another account and could not be pinned to a commit, please handle them manually:"
            }
            SoftErrorKind::MissingTag => {
                "Tags for the following modules could not be found upstream, please look them up and handle these tuples manually:"
            }
        }
    }
}

/// A per-entry problem that does not stop the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoftError {
    pub kind: SoftErrorKind,
    pub message: String,
}

impl SoftError {
    pub fn new(kind: SoftErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SoftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SoftError {}
