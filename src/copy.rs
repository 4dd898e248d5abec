//! Image copying
//!
//! Files directly inside the source directory are matched against each
//! pattern in turn and copied into the destination directory under their
//! base name. A failing file is recorded and the run moves on.

use std::{
    collections::HashSet,
    ffi::OsStr,
    fs, io,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::Local;
use filetime::FileTime;
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::Config,
    report::{CopyOutcome, CopyReport},
};

/// Copy all matching images according to the [Config]
pub fn run(config: &Config) -> Result<CopyReport> {
    run_with(config, |_| {})
}

/// Like [run], calling `on_outcome` as soon as each file is done
pub fn run_with<F>(config: &Config, mut on_outcome: F) -> Result<CopyReport>
where
    F: FnMut(&CopyOutcome),
{
    let started = Local::now();
    let patterns = config
        .patterns
        .iter()
        .map(String::as_str)
        .map(Pattern::new)
        .collect::<Result<Vec<_>>>()?;

    let destination = &config.destination_dir;
    if !destination.is_dir() {
        info!("Creating destination directory {}", destination.display());
    }
    fs::create_dir_all(destination)
        .with_context(|| format!("failed to create {}", destination.display()))?;

    info!(
        "Copying images from {} to {}",
        config.source_dir.display(),
        destination.display()
    );
    let files = list_source_files(&config.source_dir);
    debug!("Found {} files in {}", files.len(), config.source_dir.display());

    let mut seen = HashSet::new();
    let mut outcomes = Vec::new();

    for pattern in &patterns {
        for file in files.iter().filter(|f| pattern.matches(f)) {
            if config.deduplicate && !seen.insert(file) {
                debug!(
                    "Skipping {} (already matched by an earlier pattern)",
                    file.display()
                );
                continue;
            }

            let outcome = copy_into(file, destination);
            match &outcome {
                CopyOutcome::Copied {
                    source,
                    destination,
                } => debug!("Copied {} to {}", source.display(), destination.display()),
                CopyOutcome::Failed { source, error } => {
                    warn!("Failed to copy {}: {error}", source.display())
                }
            }
            on_outcome(&outcome);
            outcomes.push(outcome);
        }
    }

    let report = CopyReport {
        destination: destination.clone(),
        outcomes,
        started,
        finished: Local::now(),
    };
    info!(
        "Copied {} images ({} failed) in {} ms",
        report.copied_count(),
        report.failed_count(),
        report.elapsed().num_milliseconds()
    );

    Ok(report)
}

/// Glob matched against a file's base name
#[derive(Debug)]
struct Pattern {
    matcher: GlobMatcher,
    /// Leading dots are only matched explicitly, as in shell globbing
    matches_hidden: bool,
}

impl Pattern {
    fn new(pattern: &str) -> Result<Self> {
        if pattern.contains('/') || pattern.contains(MAIN_SEPARATOR) {
            bail!("patterns must match base names but got '{pattern}'");
        }
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid pattern '{pattern}'"))?
            .compile_matcher();

        Ok(Self {
            matcher,
            matches_hidden: pattern.starts_with('.'),
        })
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if is_hidden(name) && !self.matches_hidden {
            return false;
        }
        self.matcher.is_match(name)
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Non-directory entries directly inside `source_dir`, in filesystem order
///
/// Links to directories are left out, dangling links are kept so that
/// copying them fails visibly. An unreadable or missing directory yields
/// no entries.
fn list_source_files(source_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|x| {
            x.inspect_err(|e| warn!("Skipping unreadable entry: {e}"))
                .ok()
        })
        .filter(|e| !e.path().is_dir())
        .map(|e| e.into_path())
        .collect()
}

/// Copy `source` into `dir` under its base name
fn copy_into(source: &Path, dir: &Path) -> CopyOutcome {
    let Some(name) = source.file_name() else {
        return CopyOutcome::Failed {
            source: source.to_owned(),
            error: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        };
    };
    let destination = dir.join(name);

    match copy_file_with_metadata(source, &destination) {
        Ok(()) => CopyOutcome::Copied {
            source: source.to_owned(),
            destination,
        },
        Err(error) => CopyOutcome::Failed {
            source: source.to_owned(),
            error,
        },
    }
}

/// Copy contents and permissions, then carry over access and modification times
///
/// Overwrites an existing `destination` but never a file onto itself.
pub fn copy_file_with_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    if let (Ok(src), Ok(dst)) = (fs::canonicalize(source), fs::canonicalize(destination)) {
        if src == dst {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} and {} are the same file",
                    source.display(),
                    destination.display()
                ),
            ));
        }
    }

    fs::copy(source, destination)?;

    let metadata = fs::metadata(source)?;
    filetime::set_file_times(
        destination,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
}
