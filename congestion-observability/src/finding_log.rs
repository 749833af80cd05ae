//! Append-only finding log.
//!
//! One line per successful report cycle:
//! `[2025-03-01T10:15:00+01:00] id=2 | name=B | speed=12`.
//!
//! The file is opened in append mode for every entry and held under an
//! exclusive advisory lock while the entry is written, so concurrent
//! processes never interleave partial lines. Existing content is never
//! read, truncated or rotated.
//!
//! Timestamps are wall-clock time in a fixed IANA zone (Europe/Madrid unless
//! configured otherwise), independent of the host's `TZ`.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use chrono_tz::Tz;
use fs4::fs_std::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_ZONE: Tz = chrono_tz::Europe::Madrid;

#[derive(Debug, Clone)]
pub struct FindingLog {
    path: PathBuf,
    zone: Tz,
}

impl FindingLog {
    /// Prepare the log at `path`, creating parent directories.
    ///
    /// The file itself is created lazily by the first append.
    pub fn new(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        info!(path = %path.display(), "Finding log ready");
        Ok(Self { path, zone: DEFAULT_ZONE })
    }

    /// Stamp entries in `zone` instead of [`DEFAULT_ZONE`].
    pub fn with_zone(mut self, zone: Tz) -> Self {
        self.zone = zone;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// `at` as wall-clock time in the log's zone.
    pub fn stamp(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.zone).fixed_offset()
    }

    /// Append `line` stamped with the current time. Returns the entry
    /// written, without its trailing newline.
    pub fn append(&self, line: &str) -> io::Result<String> {
        self.append_at(line, self.stamp(Utc::now()))
    }

    /// Append `line` stamped with `at`.
    pub fn append_at(&self, line: &str, at: DateTime<FixedOffset>) -> io::Result<String> {
        let entry = format_entry(line, &at);
        let mut buf = Vec::with_capacity(entry.len() + 1);
        buf.extend_from_slice(entry.as_bytes());
        buf.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        FileExt::lock_exclusive(&file)?;
        let written = file.write_all(&buf).and_then(|()| file.flush());
        if let Err(e) = FileExt::unlock(&file) {
            // Closing the file below releases the lock anyway.
            warn!(path = %self.path.display(), error = %e, "Finding log unlock failed");
        }
        written?;

        debug!(path = %self.path.display(), "Finding appended");
        Ok(entry)
    }
}

/// `[<RFC 3339 timestamp with offset>] <line>`
pub fn format_entry(line: &str, at: &DateTime<FixedOffset>) -> String {
    format!("[{}] {}", at.to_rfc3339_opts(SecondsFormat::Secs, false), line)
}
