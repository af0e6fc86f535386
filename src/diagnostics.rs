//! Point-in-time snapshot sink for operator debugging
//!
//! Each automation attempt captures the page at fixed checkpoints. The sink
//! is injectable so tests run without touching the filesystem. Capture
//! failures are logged and swallowed: snapshots must never change the
//! returned record sequence.

use std::path::PathBuf;

use tracing::{debug, warn};

/// The four fixed capture points, one pair per attempt variant. The file
/// names are stable operator-facing contract: the search endpoint lists
/// them verbatim when both attempts fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotCheckpoint {
    PrimaryLoaded,
    PrimaryResults,
    FallbackLoaded,
    FallbackResults,
}

impl SnapshotCheckpoint {
    pub fn file_name(self) -> &'static str {
        match self {
            SnapshotCheckpoint::PrimaryLoaded => "debug-screenshot.png",
            SnapshotCheckpoint::PrimaryResults => "debug-results.png",
            SnapshotCheckpoint::FallbackLoaded => "debug-alt-screenshot.png",
            SnapshotCheckpoint::FallbackResults => "debug-alt-results.png",
        }
    }

    /// All checkpoint file names in capture order, as reported to callers.
    pub fn all_file_names() -> [&'static str; 4] {
        [
            SnapshotCheckpoint::PrimaryLoaded.file_name(),
            SnapshotCheckpoint::PrimaryResults.file_name(),
            SnapshotCheckpoint::FallbackLoaded.file_name(),
            SnapshotCheckpoint::FallbackResults.file_name(),
        ]
    }
}

/// Accepts a PNG snapshot at a named checkpoint.
pub trait SnapshotSink: Send + Sync {
    fn capture(&self, checkpoint: SnapshotCheckpoint, png: &[u8]);
}

/// Default sink: writes each snapshot to `<dir>/<checkpoint file name>`,
/// overwriting previous attempts' captures.
pub struct FileSnapshotSink {
    dir: PathBuf,
}

impl FileSnapshotSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SnapshotSink for FileSnapshotSink {
    fn capture(&self, checkpoint: SnapshotCheckpoint, png: &[u8]) {
        let path = self.dir.join(checkpoint.file_name());
        match std::fs::write(&path, png) {
            Ok(()) => debug!("Saved snapshot {}", path.display()),
            Err(e) => warn!("Failed to save snapshot {}: {}", path.display(), e),
        }
    }
}

/// Discards snapshots. Used in tests and when diagnostics are disabled.
pub struct NoopSnapshotSink;

impl SnapshotSink for NoopSnapshotSink {
    fn capture(&self, _checkpoint: SnapshotCheckpoint, _png: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_names_match_reported_screenshot_list() {
        assert_eq!(
            SnapshotCheckpoint::all_file_names(),
            [
                "debug-screenshot.png",
                "debug-results.png",
                "debug-alt-screenshot.png",
                "debug-alt-results.png",
            ]
        );
    }

    #[test]
    fn file_sink_writes_under_configured_dir() {
        let dir = std::env::temp_dir().join(format!("cpso_snap_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let sink = FileSnapshotSink::new(&dir);
        sink.capture(SnapshotCheckpoint::PrimaryLoaded, b"not-really-png");
        assert!(dir.join("debug-screenshot.png").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
