//! Which icons the current outputs were generated from
//!
//! Timestamps alone miss a deleted icon, or one copied in with an old
//! mtime. The manifest keeps the input list of the last complete cycle so
//! the next check can compare sets.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use webfont_core::error::{Result, WebfontError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputManifest {
    /// Sorted input paths, as discovered
    pub inputs: Vec<PathBuf>,
}

impl InputManifest {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self { inputs }
    }

    /// Load the manifest at `path`
    ///
    /// A missing or unparsable file yields `None`; either way the outputs
    /// cannot be trusted to match the inputs.
    pub fn read(path: &Path) -> Option<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                return None;
            },
        };
        match serde_json::from_slice(&bytes) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                log::warn!("ignoring malformed {}: {e}", path.display());
                None
            },
        }
    }

    /// Whether `inputs` is exactly the recorded set
    pub fn covers(&self, inputs: &[PathBuf]) -> bool {
        self.inputs == inputs
    }

    pub(crate) fn to_json(&self, path: &Path) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| WebfontError::write(path, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(InputManifest::read(&tmp.path().join("none.json")), None);
    }

    #[test]
    fn test_garbage_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("webfont.inputs.json");
        fs::write(&path, b"{ not json").unwrap();

        assert_eq!(InputManifest::read(&path), None);
    }

    #[test]
    fn test_covers_compares_the_whole_set() {
        let manifest = InputManifest::new(vec![PathBuf::from("a.svg"), PathBuf::from("b.svg")]);

        assert!(manifest.covers(&[PathBuf::from("a.svg"), PathBuf::from("b.svg")]));
        assert!(!manifest.covers(&[PathBuf::from("a.svg")]));
        assert!(!manifest.covers(&[
            PathBuf::from("a.svg"),
            PathBuf::from("b.svg"),
            PathBuf::from("c.svg"),
        ]));
    }
}
