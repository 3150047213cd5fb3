//! Trace Log
//!
//! Append-only file shared by both trace workers. Each entry is a header line
//! followed by the raw trace output, written in one piece under a lock so two
//! entries never interleave.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::probe::TraceMode;

#[derive(Debug)]
pub struct TraceLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TraceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header line for a trace started at `started`
    pub fn header(mode: TraceMode, started: DateTime<Local>) -> String {
        format!(
            "{} trace results at {}",
            mode.label(),
            started.format("%Y-%m-%dT%H:%M:%S%.6f")
        )
    }

    /// Append one entry: `header` then every line of `lines`.
    ///
    /// The file is opened in append mode per entry, so an external rotation
    /// or deletion between entries is tolerated.
    pub async fn append(&self, header: &str, lines: &[String]) -> Result<()> {
        let mut entry = String::with_capacity(
            header.len() + 1 + lines.iter().map(|l| l.len() + 1).sum::<usize>(),
        );
        entry.push_str(header);
        entry.push('\n');
        for line in lines {
            entry.push_str(line.trim_end_matches(['\r', '\n']));
            entry.push('\n');
        }

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_header_format() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            TraceLog::header(TraceMode::Quick, started),
            "Quick trace results at 2024-03-09T14:05:07.000000"
        );
        assert!(TraceLog::header(TraceMode::Full, started).starts_with("Full trace results at "));
    }

    #[tokio::test]
    async fn test_append_creates_and_appends() {
        let dir = tempdir().unwrap();
        let log = TraceLog::new(dir.path().join("traces.txt"));

        log.append("first", &["a".to_string(), "b\r\n".to_string()])
            .await
            .unwrap();
        log.append("second", &[]).await.unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "first\na\nb\nsecond\n");
    }

    #[tokio::test]
    async fn test_append_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let log = TraceLog::new(dir.path().join("missing").join("traces.txt"));

        assert!(log.append("header", &[]).await.is_err());
    }
}
