//! Append-only record of everything a batch did, one timestamped line per
//! event.

use {
    chrono::{DateTime, SecondsFormat, Utc},
    std::{
        fs::{File, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
    },
};

pub trait AuditLog {
    fn append(&mut self, timestamp: DateTime<Utc>, message: &str) -> io::Result<()>;

    fn record(&mut self, message: &str) -> io::Result<()> {
        self.append(Utc::now(), message)
    }
}

/// `[2024-05-01T12:00:00.000Z] message`. Line breaks inside the message are
/// flattened so that every entry stays on a single line.
pub fn format_entry(timestamp: DateTime<Utc>, message: &str) -> String {
    let message = message.lines().collect::<Vec<_>>().join(" | ");
    format!(
        "[{}] {message}",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

#[derive(Debug)]
pub struct FileAuditLog {
    path: PathBuf,
    file: File,
}

impl FileAuditLog {
    /// Opens `path` for appending, creating it if needed. Existing entries are
    /// never truncated.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLog for FileAuditLog {
    fn append(&mut self, timestamp: DateTime<Utc>, message: &str) -> io::Result<()> {
        let entry = format_entry(timestamp, message);
        writeln!(self.file, "{entry}")?;
        self.file.flush()
    }
}

#[cfg(test)]
impl AuditLog for Vec<String> {
    fn append(&mut self, timestamp: DateTime<Utc>, message: &str) -> io::Result<()> {
        self.push(format_entry(timestamp, message));
        Ok(())
    }
}
