//! Explicit file timestamp modification.
//!
//! [`FileTimestamps`] names the timestamps to change; fields left as `None`
//! keep their current value on disk.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::platform;

/// Timestamps to apply to a file.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::time::{Duration, UNIX_EPOCH};
/// use fsext::{FileTimestamps, set_file_times};
///
/// let times = FileTimestamps::new()
///     .with_modified(UNIX_EPOCH + Duration::from_secs(1_609_502_400));
/// set_file_times(Path::new("report.pdf"), &times)?;
/// # Ok::<(), fsext::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileTimestamps {
    /// Creation (birth) time. Ignored where the platform has no such concept.
    pub created: Option<SystemTime>,
    /// Last modification time.
    pub modified: Option<SystemTime>,
    /// Last access time.
    pub accessed: Option<SystemTime>,
}

impl FileTimestamps {
    /// No timestamps set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creation time
    #[must_use]
    pub fn with_created(mut self, time: SystemTime) -> Self {
        self.created = Some(time);
        self
    }

    /// Set the modification time
    #[must_use]
    pub fn with_modified(mut self, time: SystemTime) -> Self {
        self.modified = Some(time);
        self
    }

    /// Set the access time
    #[must_use]
    pub fn with_accessed(mut self, time: SystemTime) -> Self {
        self.accessed = Some(time);
        self
    }

    /// Returns `true` if no timestamp is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_none() && self.modified.is_none() && self.accessed.is_none()
    }
}

/// Change the creation, modification and/or access time of a file.
///
/// Only the fields that are set are applied. On platforms without a
/// creation time (Linux and other POSIX systems) `created` is silently
/// ignored. When nothing is set the call returns immediately without
/// touching the file system.
///
/// # Errors
///
/// - [`Error::Io`](crate::Error::Io) if the file cannot be opened or the
///   timestamps cannot be written (for instance, the path does not exist)
/// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if a time
///   cannot be represented by the platform
pub fn set_file_times(path: &Path, times: &FileTimestamps) -> Result<()> {
    if times.is_empty() {
        return Ok(());
    }
    platform::current().set_file_times(path, times)
}

/// Seconds between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_OFFSET_SECS: u64 = 11_644_473_600;
/// FILETIME counts 100-nanosecond intervals.
const FILETIME_TICKS_PER_SEC: u64 = 10_000_000;

/// Convert a `SystemTime` to Windows FILETIME ticks (100 ns since 1601).
///
/// Returns `None` for times before 1601 or past the 64-bit tick range.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn filetime_ticks(time: SystemTime) -> Option<u64> {
    let since_1601 = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => Duration::from_secs(FILETIME_UNIX_OFFSET_SECS).checked_add(after)?,
        Err(before) => Duration::from_secs(FILETIME_UNIX_OFFSET_SECS).checked_sub(before.duration())?,
    };
    let ticks = u128::from(since_1601.as_secs()) * u128::from(FILETIME_TICKS_PER_SEC)
        + u128::from(since_1601.subsec_nanos() / 100);
    // FILETIME values with the high bit set are rejected by the OS.
    u64::try_from(ticks).ok().filter(|t| *t <= i64::MAX as u64)
}
