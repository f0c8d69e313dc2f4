use std::fmt;

pub const GITHUB_SITE: &str = "https://github.com";
pub const GITLAB_SITE: &str = "https://gitlab.com";

/// Where a tuple is fetched from.
///
/// Ordering follows declaration order, so sorting by source groups Github
/// tuples before Gitlab ones and keeps custom Gitlab sites last.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// No mirror known (yet).
    #[default]
    Unresolved,
    Github,
    Gitlab,
    /// Self-hosted Gitlab instance, e.g. `https://gitlab.howett.net`.
    GitlabCustom(String),
}

impl Source {
    /// Base URL of the hosting site.
    pub fn site(&self) -> &str {
        match self {
            Source::Unresolved => "",
            Source::Github => GITHUB_SITE,
            Source::Gitlab => GITLAB_SITE,
            Source::GitlabCustom(site) => site,
        }
    }

    /// Ports framework variable the tuple is listed under.
    pub fn var_name(&self) -> Option<&'static str> {
        match self {
            Source::Unresolved => None,
            Source::Github => Some("GH_TUPLE"),
            Source::Gitlab | Source::GitlabCustom(_) => Some("GL_TUPLE"),
        }
    }

    pub fn is_github(&self) -> bool {
        matches!(self, Source::Github)
    }

    pub fn is_gitlab(&self) -> bool {
        matches!(self, Source::Gitlab | Source::GitlabCustom(_))
    }

    /// Custom sites have to be spelled out in front of the tuple.
    pub fn is_default_site(&self) -> bool {
        match self {
            Source::GitlabCustom(site) => site.trim_end_matches('/') == GITLAB_SITE,
            _ => true,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Unresolved => f.write_str("unresolved"),
            Source::Github => f.write_str("GH"),
            Source::Gitlab => f.write_str("GL"),
            Source::GitlabCustom(site) => write!(f, "GL{{{}}}", site),
        }
    }
}
