//! Import path → mirror resolution.
//!
//! Strategies are tried in order: the fixed mirror table, generic Github
//! and Gitlab paths, then the vanity domain rules. When all of them miss
//! and network access is allowed, the vanity host is asked once for its
//! `go-import` declaration and the redirected path is tried again.

pub mod discovery;
mod mirrors;
mod vanity;


use tracing::debug;

use crate::apis::Fetch;
use crate::config::Config;
use crate::error::Error;
use crate::tuple::{Mirror, Source, Spec, Tuple};

/// Resolve `path` without touching the network.
pub fn resolve_path(path: &str) -> Result<Option<Mirror>, Error> {
    if let Some(mirror) = mirrors::lookup(path) {
        return Ok(Some(mirror));
    }
    if let Some(mirror) = hosted(path, "github.com", "Github", Source::Github)? {
        return Ok(Some(mirror));
    }
    if let Some(mirror) = hosted(path, "gitlab.com", "Gitlab", Source::Gitlab)? {
        return Ok(Some(mirror));
    }
    Ok(vanity::lookup(path))
}

/// `host/account/project[/submodule]`.
fn hosted(
    path: &str,
    host: &str,
    name: &'static str,
    source: Source,
) -> Result<Option<Mirror>, Error> {
    if !mirrors::has_path_prefix(path, host) {
        return Ok(None);
    }
    let parts: Vec<&str> = path.splitn(4, '/').collect();
    if parts.len() < 3 || parts[1].is_empty() || parts[2].is_empty() {
        return Err(Error::PackagePath {
            host: name,
            path: path.to_string(),
        });
    }
    let mut mirror = Mirror::new(source, parts[1], parts[2]);
    if let Some(submodule) = parts.get(3) {
        mirror = mirror.with_submodule(submodule);
    }
    Ok(Some(mirror))
}

/// Build the tuple for one parsed manifest entry.
///
/// The returned tuple is unresolved when no strategy matched; the caller
/// decides how to report it.
pub fn resolve(id: usize, spec: &Spec, config: &Config, fetch: &dyn Fetch) -> Result<Tuple, Error> {
    let mut tuple = Tuple::new(id, &spec.package, &spec.version);

    let mut mirror = resolve_path(&spec.path)?;
    if mirror.is_none() && config.online() {
        if let Some(redirected) = discovery::discover(&spec.path, fetch) {
            mirror = resolve_path(&redirected)?;
            if mirror.is_none() {
                debug!(path = %spec.path, redirected = %redirected, "discovered path is not resolvable");
            }
        }
    }

    if let Some(mirror) = mirror {
        tuple.resolve_as(mirror);
    }
    Ok(tuple)
}
