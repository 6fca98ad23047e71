//! Main entry point for the photorestore CLI app

use photorestore::geotag::ExifGpsCodec;
use photorestore::{cli, extract, reconcile};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "photorestore=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match cli::run() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too; only real usage errors
            // should exit non-zero.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = run_app(&args) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_app(args: &cli::Args) -> Result<(), Box<dyn std::error::Error>> {
    if !args.archive.exists() {
        return Err(format!("File not found: {}", args.archive.display()).into());
    }

    let root = extract::extract_archive(&args.archive)?;
    let report = reconcile::reconcile_tree(&root, &ExifGpsCodec)?;

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        eprintln!("{} file(s) could not be updated:", failures.len());
        for (path, err) in &failures {
            eprintln!("  {}: {}", path.display(), err);
        }
    }

    println!(
        "Processing complete. {} file(s) geotagged under {}",
        report.updated_count(),
        root.display()
    );
    Ok(())
}
