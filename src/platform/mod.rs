//! Platform backends.
//!
//! Each backend implements the primitives behind the public API
//! against one operating environment. Exactly one is compiled in, chosen
//! by `cfg(windows)`, and [`current`] hands it out for the life of the
//! process.

use std::cmp::Ordering;
use std::fs::Metadata;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::options::CopyOptions;
use crate::progress::Decision;
use crate::times::FileTimestamps;
use crate::volume::VolumeLabel;

#[cfg(not(windows))]
mod posix;
#[cfg(windows)]
mod windows;

/// Progress callback as seen by backends.
pub(crate) type ProgressFn<'a> = dyn FnMut(u64, u64) -> Decision + 'a;

/// How a backend copy ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    /// Content and metadata are in place.
    Complete,
    /// The callback cancelled; the destination has been removed.
    Cancelled,
}

/// Primitive file operations of one operating environment.
pub(crate) trait Backend: Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Order two filenames.
    fn compare_names(&self, a: &str, b: &str) -> Ordering;

    /// Copy `src` to the already resolved and validated `dst`.
    ///
    /// `src_meta` is the metadata read during validation. Without a
    /// progress callback the copy runs in bulk; with one, the callback sees
    /// monotonically increasing byte counts never exceeding the total.
    fn copy_file(
        &self,
        src: &Path,
        dst: &Path,
        src_meta: &Metadata,
        options: &CopyOptions,
        progress: Option<&mut ProgressFn<'_>>,
    ) -> io::Result<Transfer>;

    /// Label of the volume containing `path`.
    fn volume_label(&self, path: &Path) -> VolumeLabel;

    /// Apply the set fields of `times` to `path`. `times` is never empty.
    fn set_file_times(&self, path: &Path, times: &FileTimestamps) -> Result<()>;

    /// Whether `path` carries the system attribute. `false` when the
    /// platform has no such attribute or the path cannot be queried.
    fn has_system_attribute(&self, path: &Path) -> bool;
}

#[cfg(not(windows))]
static ACTIVE: posix::PosixBackend = posix::PosixBackend;

#[cfg(windows)]
static ACTIVE: windows::WindowsBackend = windows::WindowsBackend;

/// The backend for the host platform.
#[inline]
pub(crate) fn current() -> &'static dyn Backend {
    &ACTIVE
}
