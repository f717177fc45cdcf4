use clap::Parser;
use mimesniff::Registry;
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use rayon::prelude::*;

#[derive(Debug, Clone, Parser)]
#[clap(version, about)]
struct Args {
    /// Files or directories to inspect.
    /// Reads stdin when no paths are given
    paths: Vec<PathBuf>,
    /// Descend into directories
    #[clap(short, long)]
    recursive: bool,
    /// Copy stdin to stdout unchanged, printing the type to stderr.
    /// Only applies when reading stdin
    #[clap(long)]
    passthrough: bool,
    /// Printed in place of the type when it can't be detected
    #[clap(long, default_value = "unknown")]
    unknown: String,
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env()?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();

    let args = Args::parse();
    let registry = mimesniff::registry();
    debug!(%registry, "loaded signatures");

    if args.paths.is_empty() {
        return sniff_stdin(registry, &args);
    }

    let files = collect_files(&args.paths, args.recursive);
    info!("Sniffing {} files", files.len());
    let results: Vec<_> = files
        .into_par_iter()
        .map(|path| {
            let result = sniff_path(registry, &path);
            (path, result)
        })
        .collect();

    let failed = write_results(&mut std::io::stdout().lock(), results, &args.unknown)?;
    info!("All done. {} files could not be read", failed);
    Ok(())
}

fn collect_files(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = vec![];
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        if !recursive {
            warn!("Skipping directory {} (use --recursive)", path.display());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!("Failed to walk {}: {}", path.display(), e),
            }
        }
    }
    files
}

/// Prints one `path: type` line per readable file and returns how many files
/// could not be read.
fn write_results(
    out: &mut impl Write,
    results: Vec<(PathBuf, std::io::Result<Option<Cow<'static, str>>>)>,
    unknown: &str,
) -> std::io::Result<usize> {
    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(mime) => writeln!(
                out,
                "{}: {}",
                path.display(),
                mime.as_deref().unwrap_or(unknown)
            )?,
            Err(e) => {
                failed += 1;
                warn!("Failed to read {}: {}", path.display(), e);
            }
        }
    }
    Ok(failed)
}

fn sniff_path(registry: &Registry, path: &Path) -> std::io::Result<Option<Cow<'static, str>>> {
    let (mime, reader) = registry.sniff_reader(File::open(path)?);
    if let Some(e) = reader.peek_error() {
        return Err(std::io::Error::new(e.kind(), e.to_string()));
    }
    debug!(?path, ?mime, "sniffed file");
    Ok(mime)
}

fn sniff_stdin(registry: &Registry, args: &Args) -> anyhow::Result<()> {
    let stdin = std::io::stdin().lock();
    if args.passthrough {
        let mut stdout = std::io::stdout().lock();
        let mime = passthrough(registry, stdin, &mut stdout)?;
        eprintln!("{}", mime.as_deref().unwrap_or(&args.unknown));
        return Ok(());
    }

    let (mime, reader) = registry.sniff_reader(stdin);
    if let Some(e) = reader.peek_error() {
        warn!("Error reading stdin: {}", e);
    }
    println!("{}", mime.as_deref().unwrap_or(&args.unknown));
    Ok(())
}

/// Copies `reader` to `out` unchanged and returns its detected type.
fn passthrough(
    registry: &Registry,
    reader: impl Read,
    out: &mut impl Write,
) -> std::io::Result<Option<Cow<'static, str>>> {
    let (mime, mut reader) = registry.sniff_reader(reader);
    std::io::copy(&mut reader, out)?;
    out.flush()?;
    Ok(mime)
}
