use serde::Deserialize;

use super::{api_error, decode, url_encode, Fetch};
use crate::config::Credentials;
use crate::error::Error;

pub const GITHUB_API: &str = "https://api.github.com";

#[derive(Deserialize)]
struct Commit {
    sha: String,
}

#[derive(Deserialize)]
struct Ref {
    #[serde(rename = "ref")]
    name: String,
}

/// Github REST v3 calls used by normalization and post-processing.
pub struct Github<'a> {
    fetch: &'a dyn Fetch,
    credentials: Option<&'a Credentials>,
}

impl<'a> Github<'a> {
    pub fn new(fetch: &'a dyn Fetch, credentials: Option<&'a Credentials>) -> Self {
        Self { fetch, credentials }
    }

    fn repo_url(account: &str, project: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            GITHUB_API,
            url_encode(account),
            url_encode(project)
        )
    }

    /// Full commit sha a ref (tag, branch or short commit) points at.
    pub fn commit_sha(&self, account: &str, project: &str, reference: &str) -> Result<String, Error> {
        let url = format!("{}/commits/{}", Self::repo_url(account, project), reference);
        let body = self
            .fetch
            .get(&url, self.credentials)
            .map_err(|e| api_error(format!("commit {}", reference), account, project, e))?;
        let commit: Commit = decode(&url, &body)?;
        Ok(commit.sha)
    }

    /// Whether `tag` names an existing tag exactly.
    ///
    /// For a partial name Github answers with the array of tags sharing
    /// that prefix; that counts as "no such tag".
    pub fn has_tag(&self, account: &str, project: &str, tag: &str) -> Result<bool, Error> {
        let url = format!("{}/git/refs/tags/{}", Self::repo_url(account, project), tag);
        let body = match self.fetch.get(&url, self.credentials) {
            Ok(body) => body,
            Err(e) if e.is_not_found() => return Ok(false),
            Err(e) => return Err(api_error("refs".to_string(), account, project, e)),
        };
        let value: serde_json::Value = decode(&url, &body)?;
        Ok(value.is_object())
    }

    /// All tag refs (`refs/tags/...`), oldest first.
    pub fn list_tags(&self, account: &str, project: &str) -> Result<Vec<String>, Error> {
        let url = format!("{}/git/refs/tags", Self::repo_url(account, project));
        let body = self
            .fetch
            .get(&url, self.credentials)
            .map_err(|e| api_error("refs".to_string(), account, project, e))?;
        let refs: Vec<Ref> = decode(&url, &body)?;
        Ok(refs.into_iter().map(|r| r.name).collect())
    }

    /// Find the tag a nested module release is published under.
    ///
    /// Tries `<path>/<tag>`, then `<tag>`, then the newest tag whose ref
    /// ends with `<path>/<tag>`. `None` when nothing matches.
    pub fn lookup_tag(
        &self,
        account: &str,
        project: &str,
        path: &str,
        tag: &str,
    ) -> Result<Option<String>, Error> {
        let prefixed = format!("{}/{}", path.trim_end_matches('/'), tag);
        if self.has_tag(account, project, &prefixed)? {
            return Ok(Some(prefixed));
        }
        if self.has_tag(account, project, tag)? {
            return Ok(Some(tag.to_string()));
        }
        let all = self.list_tags(account, project)?;
        Ok(all
            .iter()
            .rev()
            .find(|r| r.ends_with(&prefixed))
            .map(|r| r.trim_start_matches("refs/tags/").to_string()))
    }

    /// Whether `path` exists in the repository at `reference`.
    pub fn has_contents_at(
        &self,
        account: &str,
        project: &str,
        path: &str,
        reference: &str,
    ) -> Result<bool, Error> {
        let url = format!(
            "{}/contents/{}?ref={}",
            Self::repo_url(account, project),
            path,
            reference
        );
        match self.fetch.get(&url, self.credentials) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(api_error(format!("contents of {}", path), account, project, e)),
        }
    }
}
