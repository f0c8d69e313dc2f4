use serde::Deserialize;

use super::{api_error, decode, url_encode, Fetch};
use crate::error::Error;

#[derive(Deserialize)]
struct Commit {
    id: String,
}

/// Gitlab REST v4 calls against one site (gitlab.com or self-hosted).
pub struct Gitlab<'a> {
    fetch: &'a dyn Fetch,
    site: &'a str,
}

impl<'a> Gitlab<'a> {
    pub fn new(fetch: &'a dyn Fetch, site: &'a str) -> Self {
        Self {
            fetch,
            site: site.trim_end_matches('/'),
        }
    }

    /// Full commit id for a ref.
    pub fn commit_id(&self, account: &str, project: &str, reference: &str) -> Result<String, Error> {
        let project_id = url_encode(&format!("{}/{}", account, project));
        let url = format!(
            "{}/api/v4/projects/{}/repository/commits/{}",
            self.site, project_id, reference
        );
        let body = self
            .fetch
            .get(&url, None)
            .map_err(|e| api_error(format!("commit {}", reference), account, project, e))?;
        let commit: Commit = decode(&url, &body)?;
        Ok(commit.id)
    }
}
