pub mod run;

use std::process;

use tracing::Level;

/// Install the stderr log subscriber. Stdout carries only rendered output.
pub fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Report a failure the way every command does and exit 1.
pub fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", e);
    process::exit(1);
}
