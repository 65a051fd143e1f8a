//! Polling watcher over the icon glob
//!
//! Watch mode needs to know when to fire `watch-run`. A snapshot of
//! path → mtime is taken on every poll; any difference is a change.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use webfont_core::{
    cancel::CancellationToken,
    error::{ConfigError, Result},
};

type Snapshot = BTreeMap<PathBuf, Option<SystemTime>>;

/// Detects added, removed and modified inputs
#[derive(Debug)]
pub struct InputWatcher {
    pattern: String,
    snapshot: Snapshot,
}

impl InputWatcher {
    /// Start watching `pattern`, taking the current state as baseline
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let snapshot = scan(&pattern)?;
        Ok(Self { pattern, snapshot })
    }

    /// Number of files seen in the last snapshot
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Re-scan and report whether anything differs from the last snapshot
    pub fn poll(&mut self) -> Result<bool> {
        let current = scan(&self.pattern)?;
        let changed = current != self.snapshot;
        if changed {
            log::debug!("inputs changed under {}", self.pattern);
        }
        self.snapshot = current;
        Ok(changed)
    }

    /// Block until a change batch has settled
    ///
    /// Polls every `interval`. After the first change, keeps polling until
    /// nothing has changed for `aggregate`, so a burst of saves becomes one
    /// rebuild. Returns `false` when `stop` fires first.
    pub fn wait_for_change(
        &mut self,
        interval: Duration,
        aggregate: Duration,
        stop: &CancellationToken,
    ) -> Result<bool> {
        loop {
            if stop.is_cancelled() {
                return Ok(false);
            }
            thread::sleep(interval);
            if self.poll()? {
                break;
            }
        }

        let mut quiet_since = Instant::now();
        loop {
            if stop.is_cancelled() {
                return Ok(false);
            }
            if quiet_since.elapsed() >= aggregate {
                return Ok(true);
            }
            thread::sleep(interval.min(aggregate));
            if self.poll()? {
                quiet_since = Instant::now();
            }
        }
    }
}

fn scan(pattern: &str) -> Result<Snapshot> {
    let entries = glob::glob(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    Ok(entries
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .map(|path| {
            let modified = fs::metadata(&path).and_then(|meta| meta.modified()).ok();
            (path, modified)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn write_at(path: &std::path::Path, at: SystemTime) {
        fs::write(path, b"<svg/>").unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(at)
            .unwrap();
    }

    #[test]
    fn test_poll_detects_modification_addition_removal() {
        let tmp = tempfile::tempdir().unwrap();
        let base = SystemTime::now() - Duration::from_secs(300);
        let a = tmp.path().join("a.svg");
        write_at(&a, base);

        let mut watcher = InputWatcher::new(format!("{}/*.svg", tmp.path().display())).unwrap();
        assert_eq!(watcher.len(), 1);
        assert!(!watcher.poll().unwrap());

        write_at(&a, base + Duration::from_secs(10));
        assert!(watcher.poll().unwrap());
        assert!(!watcher.poll().unwrap());

        let b = tmp.path().join("b.svg");
        write_at(&b, base);
        assert!(watcher.poll().unwrap());
        assert_eq!(watcher.len(), 2);

        fs::remove_file(&b).unwrap();
        assert!(watcher.poll().unwrap());
        assert_eq!(watcher.len(), 1);
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let watcher = InputWatcher::new(format!("{}/*.svg", tmp.path().display())).unwrap();
        assert!(watcher.is_empty());
    }

    #[test]
    fn test_wait_returns_false_when_stopped() {
        let tmp = tempfile::tempdir().unwrap();
        let mut watcher = InputWatcher::new(format!("{}/*.svg", tmp.path().display())).unwrap();

        let stop = CancellationToken::new();
        stop.cancel();
        let changed = watcher
            .wait_for_change(Duration::from_millis(1), Duration::from_millis(1), &stop)
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_wait_reports_settled_change() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.svg");
        write_at(&a, SystemTime::now() - Duration::from_secs(60));
        let mut watcher = InputWatcher::new(format!("{}/*.svg", tmp.path().display())).unwrap();

        write_at(&a, SystemTime::now());
        let stop = CancellationToken::with_timeout(Duration::from_secs(10));
        let changed = watcher
            .wait_for_change(Duration::from_millis(5), Duration::from_millis(20), &stop)
            .unwrap();
        assert!(changed);
    }
}
