//! Text output.
//!
//! The ports output is three sections separated by blank lines: the
//! `GH_TUPLE`/`GL_TUPLE` table, an optional `post-extract:` recipe, and
//! commented error blocks. Every section sorts by explicit keys, so the
//! output does not depend on the order tuples were resolved in.

pub mod links;
pub mod spack;

#[cfg(test)]
mod tests;

use crate::error::{SoftError, SoftErrorKind};
use crate::reader::Resolution;
use crate::tuple::{Source, Tuple};

/// Entries are continued with a backslash and two tabs of indentation.
const ENTRY_SEP: &str = " \\\n\t\t";

/// Lists longer than this open on their own line.
const INLINE_MAX: usize = 2;

/// Render the full ports output for a run.
pub fn render(resolution: &Resolution, prefix: &str) -> String {
    let sections = [
        tuple_table(&resolution.tuples, prefix),
        links::post_extract(&resolution.tuples, prefix),
        error_blocks(&resolution.errors),
    ];
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Visible tuples in table order.
pub(crate) fn visible(tuples: &[Tuple]) -> Vec<&Tuple> {
    let mut out: Vec<&Tuple> = tuples
        .iter()
        .filter(|t| !t.hidden && t.is_resolved())
        .collect();
    out.sort_by(|a, b| a.composite_key().cmp(&b.composite_key()));
    out
}

/// One variable per hosting bucket, Github first.
pub fn tuple_table(tuples: &[Tuple], prefix: &str) -> String {
    let visible = visible(tuples);
    let buckets: [(&str, fn(&Source) -> bool); 2] =
        [("GH_TUPLE", Source::is_github), ("GL_TUPLE", Source::is_gitlab)];

    buckets
        .iter()
        .filter_map(|(var, belongs)| {
            let entries: Vec<String> = visible
                .iter()
                .filter(|t| belongs(&t.source))
                .map(|t| t.entry(prefix))
                .collect();
            if entries.is_empty() {
                return None;
            }
            let opener = if entries.len() > INLINE_MAX { ENTRY_SEP.trim_start() } else { "" };
            Some(format!("{}=\t{}{}", var, opener, entries.join(ENTRY_SEP)))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Commented soft error blocks, one per kind, in a fixed kind order.
pub fn error_blocks(errors: &[SoftError]) -> String {
    SoftErrorKind::ALL
        .iter()
        .filter_map(|kind| {
            let mut messages: Vec<&str> = errors
                .iter()
                .filter(|e| e.kind == *kind)
                .map(|e| e.message.as_str())
                .collect();
            if messages.is_empty() {
                return None;
            }
            messages.sort_unstable();
            messages.dedup();

            let mut block = format!("\t\t# {}", kind.header());
            for message in messages {
                block.push_str("\n\t\t#\t");
                block.push_str(message);
            }
            Some(block)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
