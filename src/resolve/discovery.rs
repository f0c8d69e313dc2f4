//! `go-import` meta tag discovery for unknown vanity domains.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::apis::Fetch;

static HEAD_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</head\s*>|<body[\s>]").expect("head end pattern"));
static META_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\s[^>]*>").expect("meta pattern"));
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)([a-z][-a-z]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("attribute pattern")
});
static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\Ahttps?://").expect("scheme pattern"));
static GIT_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.git\z").expect("suffix pattern"));

/// A `<meta name="go-import" content="prefix vcs repo">` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoImport {
    pub prefix: String,
    pub vcs: String,
    pub repo: String,
}

fn attrs(tag: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(tag)
        .map(|c| {
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map_or("", |m| m.as_str());
            (c[1].to_ascii_lowercase(), value.to_string())
        })
        .collect()
}

/// First git `go-import` declaration in the document head.
pub fn parse_go_import(html: &str) -> Option<GoImport> {
    let head = match HEAD_END_RE.find(html) {
        Some(m) => &html[..m.start()],
        None => html,
    };
    for tag in META_RE.find_iter(head) {
        let attrs = attrs(tag.as_str());
        let value = |name: &str| {
            attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        if value("name") != Some("go-import") {
            continue;
        }
        let fields: Vec<&str> = value("content").unwrap_or("").split_whitespace().collect();
        if let [prefix, vcs, repo] = fields.as_slice() {
            if *vcs == "git" {
                return Some(GoImport {
                    prefix: prefix.to_string(),
                    vcs: vcs.to_string(),
                    repo: repo.to_string(),
                });
            }
        }
    }
    None
}

/// Import path the declaration redirects `path` to: the repository URL
/// without scheme and `.git`, plus whatever `path` has below the prefix.
pub fn redirect(path: &str, import: &GoImport) -> String {
    let repo = SCHEME_RE.replace(&import.repo, "");
    let repo = GIT_SUFFIX_RE.replace(&repo, "");
    let rest = path
        .strip_prefix(import.prefix.as_str())
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or("");
    format!("{}{}", repo, rest)
}

/// Ask the vanity host where `path` lives. Any failure yields `None`.
pub fn discover(path: &str, fetch: &dyn Fetch) -> Option<String> {
    let url = format!("https://{}?go-get=1", path);
    let body = match fetch.get(&url, None) {
        Ok(body) => body,
        Err(e) => {
            debug!(path, error = %e, "go-import discovery failed");
            return None;
        }
    };
    let html = String::from_utf8_lossy(&body);
    let Some(import) = parse_go_import(&html) else {
        debug!(path, "no git go-import meta tag");
        return None;
    };
    let target = redirect(path, &import);
    debug!(path, target = %target, "discovered mirror");
    Some(target)
}
