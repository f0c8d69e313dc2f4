use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::tuple::Mirror;

/// A vanity import domain that redirects to Github.
pub(super) struct VanityRule {
    pub prefix: &'static str,
    pattern: Regex,
    build: fn(&str, &Captures) -> Mirror,
}

impl VanityRule {
    fn new(prefix: &'static str, pattern: &str, build: fn(&str, &Captures) -> Mirror) -> Self {
        Self {
            prefix,
            pattern: Regex::new(pattern).expect("vanity pattern"),
            build,
        }
    }

    pub fn resolve(&self, path: &str) -> Option<Mirror> {
        if !path.starts_with(self.prefix) {
            return None;
        }
        let caps = self.pattern.captures(path)?;
        Some((self.build)(path, &caps))
    }
}

fn group<'h>(caps: &Captures<'h>, i: usize) -> &'h str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Single-component vanity path mapped onto a fixed Github account.
macro_rules! account_rule {
    ($prefix:literal, $pattern:literal, $account:literal) => {
        VanityRule::new($prefix, $pattern, |_, caps| {
            Mirror::github($account, group(caps, 1))
        })
    };
}

/// Ordered vanity rules. Prefixes never overlap, so order only matters
/// for speed.
pub(super) static VANITY_RULES: Lazy<Vec<VanityRule>> = Lazy::new(|| {
    vec![
        // bazil.org/fuse -> github.com/bazil/fuse
        account_rule!(
            "bazil.org/",
            r"\Abazil\.org/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "bazil"
        ),
        // cloud.google.com/go/storage -> github.com/googleapis/google-cloud-go, module storage
        VanityRule::new(
            "cloud.google.com/go",
            r"\Acloud\.google\.com/go(?:/([0-9A-Za-z][-0-9A-Za-z]+))?\z",
            |_, caps| Mirror::github("googleapis", "google-cloud-go").with_submodule(group(caps, 1)),
        ),
        // go.elastic.co/apm/module/apmhttp -> github.com/elastic/apm-agent-go, module module/apmhttp
        VanityRule::new(
            "go.elastic.co/apm",
            r"\Ago\.elastic\.co/apm(?:/(module/[0-9A-Za-z][-0-9A-Za-z]+))?\z",
            |_, caps| Mirror::github("elastic", "apm-agent-go").with_submodule(group(caps, 1)),
        ),
        // go.etcd.io/bbolt -> github.com/etcd-io/bbolt
        account_rule!(
            "go.etcd.io/",
            r"\Ago\.etcd\.io/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "etcd-io"
        ),
        // go.mozilla.org/gopgagent -> github.com/mozilla-services/gopgagent
        account_rule!(
            "go.mozilla.org/",
            r"\Ago\.mozilla\.org/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "mozilla-services"
        ),
        // go.uber.org/zap -> github.com/uber-go/zap
        account_rule!(
            "go.uber.org/",
            r"\Ago\.uber\.org/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "uber-go"
        ),
        // golang.org/x/net -> github.com/golang/net
        account_rule!(
            "golang.org/x/",
            r"\Agolang\.org/x/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "golang"
        ),
        // gopkg.in/yaml.v2 -> github.com/go-yaml/yaml
        // gopkg.in/user/pkg.v3 -> github.com/user/pkg
        VanityRule::new(
            "gopkg.in/",
            r"\Agopkg\.in/([0-9A-Za-z][-0-9A-Za-z]+)(?:\.v.+)?(?:/([0-9A-Za-z][-0-9A-Za-z]+)(?:\.v.+))?\z",
            gopkg_in,
        ),
        // k8s.io/api -> github.com/kubernetes/api
        account_rule!(
            "k8s.io/",
            r"\Ak8s\.io/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "kubernetes"
        ),
        // mvdan.cc/xurls -> github.com/mvdan/xurls
        account_rule!(
            "mvdan.cc/",
            r"\Amvdan\.cc/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "mvdan"
        ),
        // rsc.io/pdf -> github.com/rsc/pdf
        account_rule!(
            "rsc.io/",
            r"\Arsc\.io/([0-9A-Za-z][-0-9A-Za-z]+)\z",
            "rsc"
        ),
    ]
});

fn gopkg_in(path: &str, caps: &Captures) -> Mirror {
    if path == "gopkg.in/fsnotify.v1" {
        return Mirror::github("fsnotify", "fsnotify");
    }
    let first = group(caps, 1);
    match caps.get(2) {
        Some(project) => Mirror::github(first, project.as_str()),
        None => Mirror::github(&format!("go-{}", first), first),
    }
}

pub(super) fn lookup(path: &str) -> Option<Mirror> {
    VANITY_RULES.iter().find_map(|rule| rule.resolve(path))
}
