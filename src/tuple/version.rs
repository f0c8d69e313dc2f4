use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

// v0.0.0-20181001143604-e0a95dfd547c
// v1.2.3-20181001143604-e0a95dfd547c
// v1.2.3-3.20181001143604-e0a95dfd547c
// v0.8.0-dev.2.0.20180608203834-19279f049241
// v2.0.0-20190101000000-0123456789ab+incompatible
static PSEUDO_VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\Av\d+\.\d+\.\d+-(?:[0-9A-Za-z.]+\.)?\d{14}-([0-9a-f]+)(?:\+incompatible)?\z",
    )
    .expect("pseudo-version pattern")
});

// v1.0.0
// v1.0.0+incompatible
// v1.2.3-pre-release-suffix
// v1.2.3-pre-release-suffix+incompatible
static SEMVER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(v\d+\.\d+\.\d+(?:-[0-9A-Za-z][0-9A-Za-z.-]*)?)(?:\+incompatible)?\z")
        .expect("semver pattern")
});

/// A module version reduced to something a fetcher understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Revision {
    /// Release tag, `+incompatible` stripped.
    Tag(String),
    /// Commit id embedded in a pseudo-version.
    Commit(String),
}

impl Revision {
    /// Classify a Go module version. Pseudo-versions win over plain tags:
    /// every pseudo-version is also a syntactically valid prerelease.
    pub fn parse(version: &str) -> Result<Self, Error> {
        if let Some(caps) = PSEUDO_VERSION_RE.captures(version) {
            return Ok(Revision::Commit(caps[1].to_string()));
        }
        if let Some(caps) = SEMVER_RE.captures(version) {
            return Ok(Revision::Tag(caps[1].to_string()));
        }
        Err(Error::Version(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Revision::Tag(s) | Revision::Commit(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Revision::Tag(s) | Revision::Commit(s) => s,
        }
    }
}

/// Plain release tags start with `v`; commit ids are bare hex.
pub fn is_tag(revision: &str) -> bool {
    revision.starts_with('v')
}

/// A 12+ character lowercase hex string, as emitted for pinned commits.
pub fn is_commit_id(revision: &str) -> bool {
    revision.len() >= 12 && revision.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
