use std::path::PathBuf;

use modtuple::apis::HttpFetcher;
use modtuple::render::{self, spack};
use modtuple::{read_file, Config};
use tracing::debug;

use super::fail;

/// Output flavour selected on the command line.
pub enum Output {
    Ports,
    Spack { app_version: Option<String> },
}

pub fn cmd_run(manifest: PathBuf, config: &Config, output: Output) {
    debug!(
        manifest = %manifest.display(),
        offline = config.offline,
        ghtags = config.lookup_github_tags,
        prefix = %config.package_prefix,
        "run"
    );

    let fetcher = HttpFetcher::new().unwrap_or_else(|e| fail(e));
    let resolution = read_file(&manifest, config, &fetcher).unwrap_or_else(|e| fail(e));

    let text = match output {
        Output::Ports => render::render(&resolution, &config.package_prefix),
        Output::Spack { app_version } => spack::resources(
            &resolution.tuples,
            &config.package_prefix,
            app_version.as_deref(),
        ),
    };
    if !text.is_empty() {
        println!("{}", text);
    }
}
