//! Per-tuple revision fix-ups that need the hosting site's API.
//!
//! Nothing here runs offline. Github lookups additionally require
//! `Config::lookup_github_tags`; Gitlab commit expansion always runs
//! online because Gitlab tuples must name a full commit id.

use tracing::debug;

use crate::apis::{Fetch, Github, Gitlab};
use crate::config::Config;
use crate::error::{Error, SoftError, SoftErrorKind};
use crate::tuple::{is_tag, Source, Tuple};

/// Normalize one resolved tuple in place.
///
/// Returns a soft error when the tuple cannot be fetched as is and has to
/// be dropped from the tuple table.
pub fn normalize(
    tuple: &mut Tuple,
    config: &Config,
    fetch: &dyn Fetch,
) -> Result<Option<SoftError>, Error> {
    if config.offline {
        return Ok(None);
    }
    match tuple.source.clone() {
        Source::Github if config.lookup_github_tags => {
            let github = Github::new(fetch, config.github_credentials.as_ref());
            normalize_github(tuple, &github)
        }
        source @ (Source::Gitlab | Source::GitlabCustom(_)) => {
            let gitlab = Gitlab::new(fetch, source.site());
            let id = gitlab.commit_id(&tuple.account, &tuple.project, &tuple.version)?;
            debug!(package = %tuple.package, from = %tuple.version, to = %id, "expanded gitlab commit");
            tuple.version = id;
            Ok(None)
        }
        _ => Ok(None),
    }
}

fn normalize_github(tuple: &mut Tuple, github: &Github) -> Result<Option<SoftError>, Error> {
    if tuple.submodule.is_empty() {
        return Ok(None);
    }

    if is_tag(&tuple.version) {
        match github.lookup_tag(&tuple.account, &tuple.project, &tuple.submodule, &tuple.version)? {
            Some(tag) => {
                if tag != tuple.version {
                    debug!(package = %tuple.package, from = %tuple.version, to = %tag, "resolved module tag");
                }
                tuple.version = tag;
            }
            None => {
                return Ok(Some(SoftError::new(
                    SoftErrorKind::MissingTag,
                    format!(
                        "{}/{}: no tag matching {}/{} (from {}@{})",
                        tuple.account,
                        tuple.project,
                        tuple.submodule,
                        tuple.version,
                        tuple.package,
                        tuple.version
                    ),
                )));
            }
        }
    }

    if github.has_contents_at(&tuple.account, &tuple.project, &tuple.submodule, &tuple.version)? {
        let suffix = format!("/{}", tuple.submodule);
        if let Some(trimmed) = tuple.subdir.strip_suffix(suffix.as_str()) {
            debug!(package = %tuple.package, "submodule is a plain directory, extracting repository root");
            tuple.subdir = trimmed.to_string();
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::tests::FakeFetch;
    use crate::tuple::Mirror;

    const MINIO: &str = "https://api.github.com/repos/minio/minio-go";

    fn online_with_tags() -> Config {
        Config {
            lookup_github_tags: true,
            ..Config::default()
        }
    }

    fn minio(submodule: &str, version: &str) -> Tuple {
        let mut t = Tuple::new(0, &format!("github.com/minio/minio-go/{}", submodule), version);
        t.resolve_as(Mirror::github("minio", "minio-go").with_submodule(submodule));
        t
    }

    #[test]
    fn test_offline_is_noop() {
        let fake = FakeFetch::new();
        let mut t = minio("v6", "v6.0.44");
        assert_eq!(normalize(&mut t, &Config::offline(), &fake).unwrap(), None);
        assert!(fake.requests().is_empty());
    }

    #[test]
    fn test_github_without_tag_lookup_is_noop() {
        let fake = FakeFetch::new();
        let mut t = minio("v6", "v6.0.44");
        normalize(&mut t, &Config::default(), &fake).unwrap();
        assert!(fake.requests().is_empty());
    }

    #[test]
    fn test_github_prefixed_tag_and_directory() {
        let fake = FakeFetch::new()
            .ok(
                &format!("{}/git/refs/tags/api/v1.2.0", MINIO),
                r#"{"ref":"refs/tags/api/v1.2.0"}"#,
            )
            .ok(&format!("{}/contents/api?ref=api/v1.2.0", MINIO), "[]");
        let mut t = minio("api", "v1.2.0");
        assert_eq!(normalize(&mut t, &online_with_tags(), &fake).unwrap(), None);
        assert_eq!(t.version, "api/v1.2.0");
        assert_eq!(t.subdir, "github.com/minio/minio-go");
    }

    #[test]
    fn test_github_major_version_subdir_kept() {
        let fake = FakeFetch::new().ok(
            &format!("{}/git/refs/tags/v6.0.44", MINIO),
            r#"{"ref":"refs/tags/v6.0.44"}"#,
        );
        let mut t = minio("v6", "v6.0.44");
        normalize(&mut t, &online_with_tags(), &fake).unwrap();
        assert_eq!(t.version, "v6.0.44");
        assert_eq!(t.subdir, "github.com/minio/minio-go/v6");
    }

    #[test]
    fn test_github_missing_tag_is_soft() {
        let fake = FakeFetch::new().ok(&format!("{}/git/refs/tags", MINIO), "[]");
        let mut t = minio("api", "v9.9.9");
        let soft = normalize(&mut t, &online_with_tags(), &fake)
            .unwrap()
            .unwrap();
        assert_eq!(soft.kind, SoftErrorKind::MissingTag);
        assert!(soft.message.contains("github.com/minio/minio-go/api@v9.9.9"));
    }

    #[test]
    fn test_github_rate_limit_is_hard() {
        let fake = FakeFetch::new().status(
            &format!("{}/git/refs/tags/api/v1.2.0", MINIO),
            403,
            "API rate limit exceeded for 127.0.0.1",
        );
        let mut t = minio("api", "v1.2.0");
        assert!(matches!(
            normalize(&mut t, &online_with_tags(), &fake),
            Err(Error::RateLimited)
        ));
    }

    #[test]
    fn test_gitlab_commit_expanded() {
        let fake = FakeFetch::new().ok(
            "https://gitlab.com/api/v4/projects/gitlab-org%2Flabkit/repository/commits/0c3fc7cdd57c",
            r#"{"id":"0c3fc7cdd57c57da5ab474aa72b6640d2bdc9ebb"}"#,
        );
        let mut t = Tuple::new(0, "gitlab.com/gitlab-org/labkit", "0c3fc7cdd57c");
        t.resolve_as(Mirror::new(Source::Gitlab, "gitlab-org", "labkit"));
        normalize(&mut t, &Config::default(), &fake).unwrap();
        assert_eq!(t.version, "0c3fc7cdd57c57da5ab474aa72b6640d2bdc9ebb");
    }

    #[test]
    fn test_gitlab_custom_site() {
        let fake = FakeFetch::new().ok(
            "https://gitlab.howett.net/api/v4/projects/go%2Fplist/repository/commits/591f970eefbb",
            r#"{"id":"591f970eefbbeb04d7b37f334a0c4c3256e32876"}"#,
        );
        let mut t = Tuple::new(0, "howett.net/plist", "591f970eefbb");
        t.resolve_as(Mirror::new(
            Source::GitlabCustom("https://gitlab.howett.net".into()),
            "go",
            "plist",
        ));
        normalize(&mut t, &Config::default(), &fake).unwrap();
        assert_eq!(t.version, "591f970eefbbeb04d7b37f334a0c4c3256e32876");
    }
}
