// this_file: crates/webfont/src/discovery.rs

//! Finding the icons and deciding whether the fonts are out of date

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use webfont_core::{
    config::ValidOptions,
    error::{ConfigError, Result, WebfontError},
};
use webfont_export::InputManifest;

/// Resolve `pattern` to a sorted list of regular files
///
/// Unreadable entries are skipped with a warning; an empty result is an
/// error because there is nothing to build a font from.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {},
            Err(e) => log::warn!("skipping unreadable input: {e}"),
        }
    }

    if files.is_empty() {
        return Err(WebfontError::NoInputFiles(pattern.to_string()));
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Latest modification time among `paths`
pub fn newest_mtime(paths: &[PathBuf]) -> Result<Option<SystemTime>> {
    let mut newest = None;
    for path in paths {
        let modified = fs::metadata(path)?.modified()?;
        if newest.map_or(true, |current| modified > current) {
            newest = Some(modified);
        }
    }
    Ok(newest)
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Why a regeneration is needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// An expected output file does not exist
    MissingOutput(PathBuf),
    /// Icons were added or removed since the outputs were written
    InputsChanged,
    /// At least one input changed after the stylesheet was written
    InputsNewer,
}

/// Outcome of comparing inputs against existing outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Stale(StaleReason),
    UpToDate,
}

impl Staleness {
    /// Compare `inputs` with the outputs `options` would produce
    ///
    /// The input set has to match the manifest of the last complete cycle.
    /// The stylesheet follows every font, so its mtime stands for the
    /// whole output set.
    pub fn evaluate(options: &ValidOptions<'_>, inputs: &[PathBuf]) -> Result<Self> {
        for output in options.output_paths() {
            if !output.is_file() {
                return Ok(Staleness::Stale(StaleReason::MissingOutput(output)));
            }
        }

        let recorded = InputManifest::read(&options.manifest_path());
        if !recorded.is_some_and(|manifest| manifest.covers(inputs)) {
            return Ok(Staleness::Stale(StaleReason::InputsChanged));
        }

        let Some(styles_mtime) = mtime(&options.stylesheet_path()) else {
            return Ok(Staleness::Stale(StaleReason::MissingOutput(
                options.stylesheet_path(),
            )));
        };

        match newest_mtime(inputs)? {
            Some(newest) if newest > styles_mtime => Ok(Staleness::Stale(StaleReason::InputsNewer)),
            _ => Ok(Staleness::UpToDate),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Staleness::Stale(_))
    }
}
