use crate::error::{Error, SoftError, SoftErrorKind};

use super::version::Revision;

const REPLACE_SEP: &str = " => ";

// ─── Spec ──────────────────────────────────────────────────────────

/// One manifest entry reduced to what the resolver needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spec {
    /// Import path the vendored sources are known under.
    pub package: String,
    /// Import path to resolve the mirror from. Differs from `package`
    /// only for replace directives.
    pub path: String,
    /// Revision to fetch.
    pub version: String,
}

/// Result of parsing one `modules.txt` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedSpec {
    Fetch(Spec),
    /// Well-formed, but nothing can be fetched for it.
    Unfetchable(SoftError),
}

// ─── Parsing ───────────────────────────────────────────────────────

/// Parse a manifest line with the leading `# ` already stripped.
///
/// Handles two forms:
///   path version                                  -> regular module
///   old [old-version] => new new-version          -> replaced module
pub fn parse_spec(spec: &str) -> Result<ParsedSpec, Error> {
    if spec.contains(REPLACE_SEP) {
        return parse_replace(spec);
    }

    let fields: Vec<&str> = spec.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(Error::FieldCount(spec.to_string()));
    }
    let version = Revision::parse(fields[1])?;
    Ok(ParsedSpec::Fetch(Spec {
        package: fields[0].to_string(),
        path: fields[0].to_string(),
        version: version.into_string(),
    }))
}

fn parse_replace(spec: &str) -> Result<ParsedSpec, Error> {
    let parts: Vec<&str> = spec.split(REPLACE_SEP).collect();
    if parts.len() != 2 {
        return Err(Error::ReplaceFormat(spec.to_string()));
    }

    // The replaced module's version is not needed, but it must be sane.
    let left: Vec<&str> = parts[0].split_whitespace().collect();
    let package = match left.as_slice() {
        [path] => *path,
        [path, version] => {
            Revision::parse(version)?;
            *path
        }
        _ => return Err(Error::FieldCount(parts[0].to_string())),
    };

    let right: Vec<&str> = parts[1].split_whitespace().collect();
    let (path, version) = match right.as_slice() {
        [path] => (*path, None),
        [path, version] => (*path, Some(*version)),
        _ => return Err(Error::FieldCount(parts[1].to_string())),
    };

    if is_local_path(path) {
        return Ok(ParsedSpec::Unfetchable(SoftError::new(
            SoftErrorKind::ReplacementLocalFilesystem,
            spec,
        )));
    }
    let Some(version) = version else {
        return Ok(ParsedSpec::Unfetchable(SoftError::new(
            SoftErrorKind::ReplacementMissingCommit,
            spec,
        )));
    };

    let version = Revision::parse(version)?;
    Ok(ParsedSpec::Fetch(Spec {
        package: package.to_string(),
        path: path.to_string(),
        version: version.into_string(),
    }))
}

/// Replacements pointing into the local tree (`./x`, `../x`, `/abs`).
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('.') || path.starts_with('/')
}
