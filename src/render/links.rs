use std::collections::{HashMap, HashSet};

use crate::tuple::{join_prefix, Tuple};

/// `post-extract:` recipe placing linked tuples into the vendor tree.
///
/// Empty when no tuple carries a link target.
pub fn post_extract(tuples: &[Tuple], prefix: &str) -> String {
    let groups: HashMap<usize, &str> = tuples.iter().map(|t| (t.id, t.group.as_str())).collect();

    let mut linked: Vec<(String, &Tuple)> = tuples
        .iter()
        .filter(|t| !t.link_target.is_empty())
        .map(|t| (join_prefix(prefix, &t.link_target), t))
        .collect();
    if linked.is_empty() {
        return String::new();
    }
    linked.sort_by(|(a_dest, a), (b_dest, b)| a_dest.cmp(b_dest).then(a.id.cmp(&b.id)));

    let mut lines = vec!["post-extract:".to_string()];
    let mut made = HashSet::new();
    for (dest, t) in &linked {
        if let Some((parent, _)) = dest.rsplit_once('/') {
            if made.insert(parent.to_string()) {
                lines.push(format!("\t@${{MKDIR}} ${{WRKSRC}}/{}", parent));
            }
        }
        if !t.submodule.is_empty() {
            lines.push(format!("\t@${{RM}} -r ${{WRKSRC}}/{}", dest));
        }

        let source_group = t
            .link_source
            .and_then(|id| groups.get(&id).copied())
            .unwrap_or(t.group.as_str());
        let mut source = format!("${{WRKSRC_{}}}", source_group);
        if !t.submodule.is_empty() {
            source.push('/');
            source.push_str(&t.submodule);
        }
        lines.push(format!("\t@${{RLN}} {} ${{WRKSRC}}/{}", source, dest));
    }
    lines.join("\n")
}
