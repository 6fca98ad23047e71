use clap::Parser;
use std::path::PathBuf;

/// Restores capture timestamps and embedded GPS tags for a media export
/// archive from its per-file sidecar JSON metadata.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the source zip archive (e.g. a photo-service takeout export).
    pub archive: PathBuf,
}

/// Parses command-line arguments and returns them, or the `clap` error when
/// the invocation is malformed. The caller decides the exit code, so a usage
/// failure can exit with status 1 rather than `clap`'s default.
pub fn run() -> Result<Args, clap::Error> {
    Args::try_parse()
}
