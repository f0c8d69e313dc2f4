use clap::Parser;
use std::path::PathBuf;
use std::process;

use modtuple::config::{
    DEBUG_KEY, DEFAULT_PACKAGE_PREFIX, LOOKUP_GITHUB_TAGS_KEY, OFFLINE_KEY, PREFIX_KEY,
};

mod cli;

use cli::run::cmd_run;

#[derive(Parser)]
#[command(
    name = "modtuple",
    version,
    about = "Convert vendor/modules.txt into GH_TUPLE/GL_TUPLE mirror tuples"
)]
struct Cli {
    /// Path to vendor/modules.txt
    manifest: PathBuf,
    /// Disable all network access
    #[arg(long, env = OFFLINE_KEY)]
    offline: bool,
    /// Look up Github tags and submodule directories
    #[arg(long, env = LOOKUP_GITHUB_TAGS_KEY)]
    ghtags: bool,
    /// Directory under ${WRKSRC} that packages are vendored into
    #[arg(long, env = PREFIX_KEY, default_value = DEFAULT_PACKAGE_PREFIX)]
    prefix: String,
    /// Log lookup decisions to stderr
    #[arg(long, env = DEBUG_KEY)]
    debug: bool,
    /// Emit Spack resource() stanzas instead of ports tuples
    #[arg(long)]
    spack: bool,
    /// Application version for the Spack when="@..." constraint
    #[arg(long, value_name = "VERSION", requires = "spack")]
    app_version: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version print to stdout and succeed.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    cli::init_logging(cli.debug);

    let config = modtuple::Config {
        offline: cli.offline,
        lookup_github_tags: cli.ghtags,
        package_prefix: cli.prefix,
        github_credentials: modtuple::Config::credentials_from_env(),
    };

    let output = if cli.spack {
        cli::run::Output::Spack {
            app_version: cli.app_version,
        }
    } else {
        cli::run::Output::Ports
    };

    cmd_run(cli.manifest, &config, output);
}
