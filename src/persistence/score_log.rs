//! Score log backends

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

/// `asctime` layout, e.g. `Mon Oct 19 08:28:00 2026`
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Local time formatted for the log
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One log line without the trailing newline
pub fn format_result(timestamp: &str, score: u32) -> String {
    format!("{timestamp} {score}")
}

/// Append-only record of finished games
pub trait ScoreLog {
    fn append_result(&mut self, timestamp: &str, score: u32) -> Result<()>;

    /// The most recent line, if any
    fn read_last_result(&mut self) -> Result<Option<String>>;
}

/// Score log backed by a text file
#[derive(Debug)]
pub struct FileScoreLog {
    path: PathBuf,
    file: File,
}

impl FileScoreLog {
    /// Open (creating if needed) the log for reading and appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| GameError::resource_init(format!("score log {}", path.display()), e))?;
        log::info!("Score log at {}", path.display());
        Ok(Self { path, file })
    }

    fn io_err(&self, source: std::io::Error) -> GameError {
        GameError::ScoreLog {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreLog for FileScoreLog {
    fn append_result(&mut self, timestamp: &str, score: u32) -> Result<()> {
        let line = format_result(timestamp, score);
        writeln!(self.file, "{line}")
            .and_then(|_| self.file.flush())
            .map_err(|e| self.io_err(e))?;
        log::info!("Recorded result: {}", line);
        Ok(())
    }

    fn read_last_result(&mut self) -> Result<Option<String>> {
        self.file.seek(SeekFrom::Start(0)).map_err(|e| self.io_err(e))?;
        let mut last = None;
        for line in BufReader::new(&self.file).lines() {
            let line = line.map_err(|e| self.io_err(e))?;
            if !line.trim().is_empty() {
                last = Some(line);
            }
        }
        Ok(last)
    }
}

/// In-memory score log
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreLog {
    pub lines: Vec<String>,
}

impl ScoreLog for MemoryScoreLog {
    fn append_result(&mut self, timestamp: &str, score: u32) -> Result<()> {
        self.lines.push(format_result(timestamp, score));
        Ok(())
    }

    fn read_last_result(&mut self) -> Result<Option<String>> {
        Ok(self.lines.last().cloned())
    }
}

impl<L: ScoreLog + ?Sized> ScoreLog for &mut L {
    fn append_result(&mut self, timestamp: &str, score: u32) -> Result<()> {
        (**self).append_result(timestamp, score)
    }

    fn read_last_result(&mut self) -> Result<Option<String>> {
        (**self).read_last_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp_now();
        // "Mon Oct 19 08:28:00 2026"
        assert_eq!(ts.len(), 24);
        assert_eq!(ts.split_whitespace().count(), 5);
    }

    #[test]
    fn test_empty_log_has_no_last_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = FileScoreLog::open(dir.path().join("fixes.log")).unwrap();
        assert_eq!(log.read_last_result().unwrap(), None);
    }

    #[test]
    fn test_append_then_read_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixes.log");
        let mut log = FileScoreLog::open(&path).unwrap();

        log.append_result("Sun Oct 18 10:00:00 2026", 3).unwrap();
        log.append_result("Mon Oct 19 10:00:00 2026", 12).unwrap();

        assert_eq!(
            log.read_last_result().unwrap().as_deref(),
            Some("Mon Oct 19 10:00:00 2026 12")
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Sun Oct 18 10:00:00 2026 3\nMon Oct 19 10:00:00 2026 12\n"
        );
    }

    #[test]
    fn test_reopen_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixes.log");
        FileScoreLog::open(&path)
            .unwrap()
            .append_result("Sun Oct 18 10:00:00 2026", 1)
            .unwrap();

        let mut log = FileScoreLog::open(&path).unwrap();
        log.append_result("Mon Oct 19 10:00:00 2026", 2).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixes.log");
        fs::write(&path, "Sun Oct 18 10:00:00 2026 4\n\n\n").unwrap();
        let mut log = FileScoreLog::open(&path).unwrap();
        assert_eq!(
            log.read_last_result().unwrap().as_deref(),
            Some("Sun Oct 18 10:00:00 2026 4")
        );
    }

    #[test]
    fn test_open_in_missing_dir_fails() {
        let err = FileScoreLog::open("/no/such/dir/fixes.log").unwrap_err();
        assert!(matches!(err, GameError::ResourceInit { .. }));
    }
}
