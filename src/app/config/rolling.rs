//! Size-capped log file with numbered backups.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends to `path` and moves it to `path.1` once the next write would
/// push it past `max_bytes`. Older backups shift up to `path.<max_backups>`;
/// anything beyond that is deleted.
#[derive(Debug)]
pub struct RollingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    /// Open `path` for appending, creating parent directories as needed.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, max_backups: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = append(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            max_backups,
            file,
            written,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.max_backups == 0 {
            self.file = File::create(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup(self.max_backups);
        if oldest.exists() {
            fs::remove_file(oldest)?;
        }
        for n in (1..self.max_backups).rev() {
            let from = self.backup(n);
            if from.exists() {
                fs::rename(&from, self.backup(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup(1))?;

        self.file = append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A record larger than the cap still lands whole in a fresh file
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_appends_below_cap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trading.log");
        let mut log = RollingFile::open(&path, 100, 2).unwrap();

        log.write_all(b"one\n").unwrap();
        log.write_all(b"two\n").unwrap();

        assert_eq!(read(&path), "one\ntwo\n");
        assert!(!dir.path().join("trading.log.1").exists());
    }

    #[test]
    fn test_rotates_and_caps_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trading.log");
        let mut log = RollingFile::open(&path, 8, 2).unwrap();

        for line in ["aaaaaa\n", "bbbbbb\n", "cccccc\n", "dddddd\n"] {
            log.write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(read(&path), "dddddd\n");
        assert_eq!(read(&dir.path().join("trading.log.1")), "cccccc\n");
        assert_eq!(read(&dir.path().join("trading.log.2")), "bbbbbb\n");
        assert!(!dir.path().join("trading.log.3").exists());
    }

    #[test]
    fn test_reopen_counts_existing_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("trading.log");
        {
            let mut log = RollingFile::open(&path, 10, 1).unwrap();
            log.write_all(b"12345678\n").unwrap();
        }

        let mut log = RollingFile::open(&path, 10, 1).unwrap();
        assert_eq!(log.path(), path);
        log.write_all(b"next\n").unwrap();

        assert_eq!(read(&path), "next\n");
        assert_eq!(read(&dir.path().join("logs").join("trading.log.1")), "12345678\n");
    }

    #[test]
    fn test_zero_backups_truncates_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trading.log");
        let mut log = RollingFile::open(&path, 4, 0).unwrap();

        log.write_all(b"old\n").unwrap();
        log.write_all(b"new\n").unwrap();

        assert_eq!(read(&path), "new\n");
        assert!(!dir.path().join("trading.log.1").exists());
    }
}
