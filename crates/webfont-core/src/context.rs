//! The host's view of one build, as seen by a hook

use std::path::{Path, PathBuf};

use crate::cancel::CancellationToken;

/// One in-progress compilation
///
/// Created by the host for every build or rebuild and lent to each hook in
/// turn. Hooks read the cancellation token and record the files the host
/// should watch before the next rebuild.
#[derive(Debug, Default)]
pub struct Compilation {
    // How long we may take
    cancel: CancellationToken,

    // What the host should watch next
    file_dependencies: Vec<PathBuf>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            file_dependencies: Vec::new(),
        }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Ask the host to watch `path`; duplicates are ignored
    pub fn add_file_dependency(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.file_dependencies.contains(&path) {
            log::trace!("file dependency: {}", path.display());
            self.file_dependencies.push(path);
        }
    }

    pub fn file_dependencies(&self) -> &[PathBuf] {
        &self.file_dependencies
    }

    pub fn depends_on(&self, path: &Path) -> bool {
        self.file_dependencies.iter().any(|dep| dep == path)
    }
}
