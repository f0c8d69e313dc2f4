//! Slice-level passes over the collected tuples.
//!
//! Every pass sorts by an explicit total key before walking the slice,
//! so the outcome does not depend on the order tuples were collected in,
//! and running the passes a second time changes nothing.


use std::collections::HashSet;

use tracing::debug;

use crate::apis::{Fetch, Github};
use crate::config::Config;
use crate::error::{Error, SoftError, SoftErrorKind};
use crate::tuple::{join_prefix, Tuple};

/// Canonical package and its alias spelling. When both resolve to the
/// same repository and revision the alias is served by a symlink.
pub const ALIASES: &[(&str, &str)] = &[("github.com/fsnotify/fsnotify", "gopkg.in/fsnotify.v1")];

const SHORT_SHA_LEN: usize = 12;

/// Run all passes in order. Returns the soft errors raised on the way.
pub fn postprocess(
    tuples: &mut Vec<Tuple>,
    config: &Config,
    fetch: &dyn Fetch,
) -> Result<Vec<SoftError>, Error> {
    let mut errors = Vec::new();
    if tuples.len() < 2 {
        return Ok(errors);
    }

    unique_groups(tuples);
    if config.online() {
        errors.extend(unique_project_tags(tuples, config, fetch)?);
    }
    subdir_collisions(tuples);
    link_aliases(tuples, ALIASES);

    Ok(errors)
}

// ─── Pass 1: group names ───────────────────────────────────────────

/// Make group names unique by suffixing `_1`, `_2`, ... to every
/// repeated group after the first.
pub fn unique_groups(tuples: &mut [Tuple]) {
    tuples.sort_by(|a, b| {
        a.group
            .cmp(&b.group)
            .then_with(|| a.composite_key().cmp(&b.composite_key()))
    });

    let mut taken: HashSet<String> = tuples.iter().map(|t| t.group.clone()).collect();
    let mut seen = HashSet::new();
    for t in tuples.iter_mut() {
        if seen.insert(t.group.clone()) {
            continue;
        }
        let renamed = (1..)
            .map(|n| format!("{}_{}", t.group, n))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default();
        debug!(package = %t.package, from = %t.group, to = %renamed, "renamed duplicate group");
        taken.insert(renamed.clone());
        seen.insert(renamed.clone());
        t.group = renamed;
    }
}

// ─── Pass 2: same project and tag across accounts ──────────────────

/// Github distfiles are named after project and tag, so two accounts
/// shipping the same project at the same tag would clash. Every tuple
/// after the first in such a run is pinned to its commit instead.
pub fn unique_project_tags(
    tuples: &mut Vec<Tuple>,
    config: &Config,
    fetch: &dyn Fetch,
) -> Result<Vec<SoftError>, Error> {
    // Account last, so tuples sharing project and tag are adjacent.
    tuples.sort_by(|a, b| {
        (&a.source, &a.project, &a.version, &a.account)
            .cmp(&(&b.source, &b.project, &b.version, &b.account))
            .then_with(|| a.composite_key().cmp(&b.composite_key()))
    });

    let github = Github::new(fetch, config.github_credentials.as_ref());
    let mut errors = Vec::new();
    let mut dropped = HashSet::new();

    let mut start = 0;
    while start < tuples.len() {
        let mut end = start + 1;
        while end < tuples.len()
            && tuples[end].source == tuples[start].source
            && tuples[end].project == tuples[start].project
            && tuples[end].version == tuples[start].version
        {
            end += 1;
        }

        if tuples[start].source.is_github() {
            let first_account = tuples[start].account.clone();
            for i in start + 1..end {
                if tuples[i].account == first_account {
                    continue;
                }
                let t = &tuples[i];
                let pinned = match github.commit_sha(&t.account, &t.project, &t.version) {
                    Ok(sha) => sha.get(..SHORT_SHA_LEN).map(str::to_string),
                    Err(Error::RateLimited) => return Err(Error::RateLimited),
                    Err(e) => {
                        debug!(package = %t.package, error = %e, "commit lookup failed");
                        None
                    }
                };
                match pinned {
                    Some(commit) => {
                        debug!(package = %t.package, tag = %t.version, commit = %commit, "pinned to commit");
                        tuples[i].version = commit;
                    }
                    None => {
                        errors.push(SoftError::new(
                            SoftErrorKind::DuplicateProjectAndTag,
                            format!(
                                "{} (from {}@{})",
                                t.entry(&config.package_prefix),
                                t.package,
                                t.version
                            ),
                        ));
                        dropped.insert(t.id);
                    }
                }
            }
        }
        start = end;
    }

    tuples.retain(|t| !dropped.contains(&t.id));
    Ok(errors)
}

// ─── Pass 3: shared extraction directories ─────────────────────────

/// Tuples landing in the same directory: identical revisions are
/// redundant and hidden, differing ones are extracted on their own and
/// symlinked into place.
pub fn subdir_collisions(tuples: &mut [Tuple]) {
    tuples.sort_by(|a, b| {
        // The repository root, if present, heads its run.
        (&a.subdir, !a.submodule.is_empty(), &a.version, &a.submodule)
            .cmp(&(&b.subdir, !b.submodule.is_empty(), &b.version, &b.submodule))
            .then_with(|| a.composite_key().cmp(&b.composite_key()))
    });

    let mut start = 0;
    while start < tuples.len() {
        let mut end = start + 1;
        while end < tuples.len() && tuples[end].subdir == tuples[start].subdir {
            end += 1;
        }

        if !tuples[start].subdir.is_empty() {
            let first_version = tuples[start].version.clone();
            for t in &mut tuples[start + 1..end] {
                if t.version == first_version {
                    t.hidden = true;
                } else {
                    t.link_target = if t.submodule.is_empty() {
                        t.subdir.clone()
                    } else {
                        join_prefix(&t.subdir, &t.submodule)
                    };
                    t.subdir.clear();
                    t.link_source = Some(t.id);
                }
            }
        }
        start = end;
    }
}

// ─── Pass 4: known aliases ─────────────────────────────────────────

/// Serve alias spellings of a canonical package from the canonical
/// tuple's extraction.
pub fn link_aliases(tuples: &mut [Tuple], aliases: &[(&str, &str)]) {
    tuples.sort_by(|a, b| a.composite_key().cmp(&b.composite_key()));

    for (canonical, _alias) in aliases {
        let Some(source) = tuples.iter().find(|t| t.package == *canonical) else {
            continue;
        };
        let (id, account, project, version) = (
            source.id,
            source.account.clone(),
            source.project.clone(),
            source.version.clone(),
        );

        for t in tuples.iter_mut() {
            if t.id == id
                || t.link_source.is_some()
                || t.subdir.is_empty()
                || t.account != account
                || t.project != project
                || t.version != version
            {
                continue;
            }
            debug!(package = %t.package, canonical = %canonical, "aliased to canonical package");
            t.link_source = Some(id);
            t.link_target = std::mem::take(&mut t.subdir);
            t.hidden = true;
        }
    }
}
