//! Manifest reader: line filtering, parallel resolution, error collection.
//!
//! Qualifying lines are resolved on a rayon pool sized to the machine.
//! A hard error short-circuits the whole run; soft errors travel next to
//! the tuples and end up as comments in the output.


use std::io::BufRead;
use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use crate::apis::Fetch;
use crate::config::Config;
use crate::error::{Error, SoftError, SoftErrorKind};
use crate::normalize::normalize;
use crate::postprocess::postprocess;
use crate::resolve::resolve;
use crate::tuple::{parse_spec, ParsedSpec, Tuple};

/// Marker that introduces a module line in `vendor/modules.txt`.
const SPEC_MARKER: &str = "# ";

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct Resolution {
    pub tuples: Vec<Tuple>,
    pub errors: Vec<SoftError>,
}

/// What resolving a single line yields.
enum Outcome {
    Tuple(Tuple),
    Soft(SoftError),
}

/// Module lines of a manifest, marker stripped. Package lines and
/// `## explicit` annotations are skipped.
pub fn spec_lines<R: BufRead>(input: R) -> Result<Vec<String>, Error> {
    let mut specs = Vec::new();
    for line in input.lines() {
        let line = line?;
        if let Some(spec) = line.strip_prefix(SPEC_MARKER) {
            let spec = spec.trim();
            if !spec.is_empty() {
                specs.push(spec.to_string());
            }
        }
    }
    Ok(specs)
}

/// Resolve every module line of `input` and run the post-processing
/// passes over the result.
pub fn read<R: BufRead>(input: R, config: &Config, fetch: &dyn Fetch) -> Result<Resolution, Error> {
    let specs = spec_lines(input)?;
    debug!(count = specs.len(), "module lines");

    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    let outcomes: Vec<Outcome> = pool.install(|| {
        specs
            .par_iter()
            .enumerate()
            .map(|(id, spec)| resolve_line(id, spec, config, fetch))
            .collect::<Result<Vec<_>, Error>>()
    })?;

    let mut resolution = Resolution::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Tuple(t) => resolution.tuples.push(t),
            Outcome::Soft(e) => resolution.errors.push(e),
        }
    }

    let soft = postprocess(&mut resolution.tuples, config, fetch)?;
    resolution.errors.extend(soft);
    Ok(resolution)
}

/// Open and [`read`] a manifest file.
pub fn read_file(path: &Path, config: &Config, fetch: &dyn Fetch) -> Result<Resolution, Error> {
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read(std::io::BufReader::new(file), config, fetch)
}

fn resolve_line(id: usize, line: &str, config: &Config, fetch: &dyn Fetch) -> Result<Outcome, Error> {
    let spec = match parse_spec(line)? {
        ParsedSpec::Fetch(spec) => spec,
        ParsedSpec::Unfetchable(e) => return Ok(Outcome::Soft(e)),
    };

    let mut tuple = resolve(id, &spec, config, fetch)?;
    if !tuple.is_resolved() {
        return Ok(Outcome::Soft(SoftError::new(
            SoftErrorKind::UnknownMirror,
            format!(
                "{} (from {}@{})",
                tuple.entry(&config.package_prefix),
                spec.path,
                spec.version
            ),
        )));
    }

    if let Some(e) = normalize(&mut tuple, config, fetch)? {
        return Ok(Outcome::Soft(e));
    }
    Ok(Outcome::Tuple(tuple))
}
