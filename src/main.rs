//! pcapdns CLI entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pcapdns::analysis::analyze_file;
use pcapdns::cli::{find_capture_files, select_capture_file, Args, OutputFormatter};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let Some(capture_path) = resolve_capture(&args)? else {
        println!("No capture files found in {}", args.dir.display());
        return Ok(());
    };

    let analysis = analyze_file(&capture_path, &args.analyzer_config())
        .with_context(|| format!("Failed to analyze capture: {}", capture_path.display()))?;

    let report = analysis.report(args.limit());
    let title = match args.limit() {
        Some(n) => format!("Top {n} queried domains in {}:", capture_path.display()),
        None => format!("Queried domains in {}:", capture_path.display()),
    };

    let formatter = OutputFormatter::new(args.format);
    let mut stdout = io::stdout().lock();
    formatter
        .write(&title, &report, &mut stdout)
        .context("Failed to write report")?;

    Ok(())
}

/// Use the file given on the command line, or find one in the capture
/// directory. `None` means the directory holds no captures.
fn resolve_capture(args: &Args) -> Result<Option<PathBuf>> {
    if let Some(file) = &args.file {
        return Ok(Some(file.clone()));
    }

    let files = match find_capture_files(&args.dir) {
        Ok(files) => files,
        // A missing directory simply holds no captures
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read capture directory: {}", args.dir.display())
            })
        }
    };
    tracing::debug!(dir = %args.dir.display(), found = files.len(), "scanned for captures");

    let chosen = select_capture_file(&files, io::stdin().lock(), io::stdout())
        .context("Failed to select a capture file")?;
    Ok(chosen.map(PathBuf::from))
}
