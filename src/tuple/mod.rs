//! The resolved tuple and its textual form.
//!
//! A tuple is created once per manifest entry, resolved to a mirror by
//! [`crate::resolve`], then mutated in place by the post-processing
//! passes before the renderer reads it.

mod parse;
mod source;
mod version;


use once_cell::sync::Lazy;
use regex::Regex;

pub use parse::{is_local_path, parse_spec, ParsedSpec, Spec};
pub use source::{Source, GITHUB_SITE, GITLAB_SITE};
pub use version::{is_commit_id, is_tag, Revision};

/// Group name used while no mirror is known.
pub const PLACEHOLDER_GROUP: &str = "group_name";

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w]+").expect("non-word pattern"));

// ─── Mirror ────────────────────────────────────────────────────────

/// Where a Go import path is actually hosted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mirror {
    pub source: Source,
    pub account: String,
    pub project: String,
    /// Nested module directory inside the repository, if any.
    pub submodule: String,
}

impl Mirror {
    pub fn new(source: Source, account: &str, project: &str) -> Self {
        Self {
            source,
            account: account.to_string(),
            project: project.to_string(),
            submodule: String::new(),
        }
    }

    pub fn github(account: &str, project: &str) -> Self {
        Self::new(Source::Github, account, project)
    }

    pub fn with_submodule(mut self, submodule: &str) -> Self {
        self.submodule = submodule.trim_matches('/').to_string();
        self
    }
}

// ─── Tuple ─────────────────────────────────────────────────────────

pub type CompositeKey<'a> = (
    &'a Source,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    &'a str,
    usize,
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tuple {
    /// Position of the originating line among the qualifying manifest
    /// lines. Stable across sorts.
    pub id: usize,
    /// Import path as written in the manifest.
    pub package: String,
    /// Release tag or commit id.
    pub version: String,
    pub source: Source,
    pub account: String,
    pub project: String,
    pub submodule: String,
    /// Path under the vendor prefix the sources are extracted to.
    pub subdir: String,
    pub group: String,
    /// Path under `${WRKSRC}` this tuple's content is symlinked to.
    pub link_target: String,
    /// Tuple whose extraction provides the symlinked content.
    pub link_source: Option<usize>,
    /// Left out of the tuple table.
    pub hidden: bool,
}

impl Tuple {
    pub fn new(id: usize, package: &str, version: &str) -> Self {
        Self {
            id,
            package: package.to_string(),
            version: version.to_string(),
            source: Source::Unresolved,
            account: String::new(),
            project: String::new(),
            submodule: String::new(),
            subdir: package.to_string(),
            group: PLACEHOLDER_GROUP.to_string(),
            link_target: String::new(),
            link_source: None,
            hidden: false,
        }
    }

    /// Bind the tuple to a mirror and derive its group name.
    pub fn resolve_as(&mut self, mirror: Mirror) {
        self.source = mirror.source;
        self.account = mirror.account;
        self.project = mirror.project;
        self.submodule = mirror.submodule;
        self.group = self.group_name();
    }

    pub fn is_resolved(&self) -> bool {
        self.source != Source::Unresolved
    }

    /// `account_project[_<last submodule component>]`, lowercased, with
    /// runs of non-word characters collapsed to `_`.
    pub fn group_name(&self) -> String {
        if !self.is_resolved() {
            return PLACEHOLDER_GROUP.to_string();
        }
        let mut raw = format!("{}_{}", self.account, self.project);
        if let Some(base) = self.submodule.rsplit('/').next().filter(|b| !b.is_empty()) {
            raw.push('_');
            raw.push_str(base);
        }
        let collapsed = NON_WORD_RE.replace_all(&raw, "_");
        collapsed.trim_matches('_').to_lowercase()
    }

    /// Tuple table entry: `[site:]account:project:version:group[/prefix/subdir]`.
    pub fn entry(&self, prefix: &str) -> String {
        let mut out = String::new();
        if !self.source.is_default_site() {
            out.push_str(self.source.site());
            out.push(':');
        }
        out.push_str(&format!(
            "{}:{}:{}:{}",
            self.account, self.project, self.version, self.group
        ));
        if !self.subdir.is_empty() {
            out.push('/');
            out.push_str(&join_prefix(prefix, &self.subdir));
        }
        out
    }

    /// Total ordering over every field, used as a tie-breaker by all sorts.
    pub fn composite_key(&self) -> CompositeKey<'_> {
        (
            &self.source,
            self.account.as_str(),
            self.project.as_str(),
            self.version.as_str(),
            self.submodule.as_str(),
            self.group.as_str(),
            self.link_target.as_str(),
            self.subdir.as_str(),
            self.package.as_str(),
            self.id,
        )
    }
}

/// Join a vendor prefix and a relative path with exactly one `/`.
pub fn join_prefix(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let path = path.trim_start_matches('/');
    if prefix.is_empty() {
        path.to_string()
    } else if path.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, path)
    }
}
