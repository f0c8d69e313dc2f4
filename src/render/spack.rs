//! Spack `resource()` stanzas, an alternative to the ports tuple table.

use crate::tuple::{is_commit_id, join_prefix, Source, Tuple};

/// Render one `resource(...)` stanza per fetchable tuple.
///
/// Tuples hidden as exact duplicates are skipped; aliases served by a
/// symlink in the ports output get a resource of their own, placed at
/// their link target.
pub fn resources(tuples: &[Tuple], prefix: &str, app_version: Option<&str>) -> String {
    let mut selected: Vec<&Tuple> = tuples
        .iter()
        .filter(|t| t.is_resolved() && (!t.hidden || !t.link_target.is_empty()))
        .collect();
    selected.sort_by(|a, b| a.composite_key().cmp(&b.composite_key()));

    selected
        .iter()
        .map(|t| resource(t, prefix, app_version))
        .collect()
}

fn resource(t: &Tuple, prefix: &str, app_version: Option<&str>) -> String {
    let repo_url = match &t.source {
        Source::Unresolved => String::new(),
        source => format!("{}/{}/{}", source.site().trim_end_matches('/'), t.account, t.project),
    };
    let kind = if is_commit_id(&t.version) { "commit" } else { "tag" };
    let placement = if t.subdir.is_empty() { &t.link_target } else { &t.subdir };

    let mut out = format!(
        "\n    resource(name=\"{}\",\n             git=\"{}\",\n             {}=\"{}\",\n             destination=\".\",",
        t.package, repo_url, kind, t.version
    );
    if let Some(version) = app_version.filter(|v| !v.is_empty()) {
        out.push_str(&format!("\n             when=\"@{}\",", version));
    }
    out.push_str(&format!(
        "\n             placement=\"{}\")",
        join_prefix(prefix, placement)
    ));
    out
}
