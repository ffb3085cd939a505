//! Utility functions for file copy operations.
//!
//! This module contains helper functions used by the copy facade and the
//! backends: zero-copy content transfer, metadata replication, file
//! identity checks and partial-file cleanup.

use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;

use crate::options::CopyOptions;

// =============================================================================
// File content copying
// =============================================================================

/// Efficiently copy file contents using the best available method.
///
/// On Linux 4.5+, uses `copy_file_range` for zero-copy kernel-to-kernel transfer.
/// Falls back to `std::io::copy` on other platforms or on error.
#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn copy_file_contents(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst, len)
    }
    #[cfg(not(target_os = "linux"))]
    {
        use std::io::BufReader;
        let _ = len; // unused on non-Linux
        io::copy(&mut BufReader::new(src), &mut &*dst)
    }
}

/// Linux-specific: copy using copy_file_range(2) syscall.
///
/// Data never enters userspace. Falls back to io::copy if
/// copy_file_range is unavailable for this pair of files (e.g.,
/// cross-filesystem on older kernels).
#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File, len: u64) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut remaining = len;
    let mut copied: u64 = 0;

    while remaining > 0 {
        let chunk_size = remaining.min(128 * 1024 * 1024) as usize; // 128MB chunks

        // SAFETY: We're passing valid file descriptors and null offsets (use current position)
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(), // use current offset
                dst_fd,
                std::ptr::null_mut(), // use current offset
                chunk_size,
                0, // flags (reserved, must be 0)
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            // EXDEV: cross-device, ENOSYS: not supported, EINVAL: fs doesn't support it
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV)
                        | Some(libc::ENOSYS)
                        | Some(libc::EINVAL)
                        | Some(libc::EOPNOTSUPP)
                )
            {
                use std::io::BufReader;
                return io::copy(&mut BufReader::new(src), &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            // EOF reached (file may have been truncated)
            break;
        }

        let bytes_copied = result as u64;
        copied += bytes_copied;
        remaining = remaining.saturating_sub(bytes_copied);
    }

    // Pick up anything appended after the source was stat'ed.
    if remaining == 0 {
        use std::io::BufReader;
        copied += io::copy(&mut BufReader::new(src), &mut &*dst)?;
    }

    Ok(copied)
}

// =============================================================================
// Metadata utilities
// =============================================================================

/// Reproduce source ownership, permissions and timestamps on `dst_file`.
///
/// Permission failures are errors. Ownership and timestamp failures are
/// reported through [`CopyOptions::warn`] and otherwise ignored.
#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn replicate_metadata(
    src_meta: &Metadata,
    dst_file: &File,
    dst: &Path,
    options: &CopyOptions,
) -> io::Result<()> {
    // chown may clear setuid/setgid bits, so it runs before chmod.
    #[cfg(unix)]
    if options.preserve_ownership {
        if let Err(e) = preserve_ownership(src_meta, dst_file) {
            options.warn(&format!(
                "Failed to preserve ownership of {}: {}",
                dst.display(),
                e
            ));
        }
    }

    if options.preserve_permissions {
        dst_file.set_permissions(src_meta.permissions())?;
    }

    if options.preserve_timestamps {
        if let Err(e) = preserve_timestamps(src_meta, dst_file) {
            options.warn(&format!(
                "Failed to preserve timestamps of {}: {}",
                dst.display(),
                e
            ));
        }
    }

    Ok(())
}

/// Preserve file timestamps (mtime and atime)
#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn preserve_timestamps(src_meta: &Metadata, dst_file: &File) -> io::Result<()> {
    use filetime::{FileTime, set_file_handle_times};

    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    set_file_handle_times(dst_file, Some(atime), Some(mtime))
}

/// Give `dst_file` the uid/gid of the source. Skipped when they already match.
#[cfg(unix)]
fn preserve_ownership(src_meta: &Metadata, dst_file: &File) -> io::Result<()> {
    use std::os::unix::fs::{MetadataExt, fchown};

    let dst_meta = dst_file.metadata()?;
    if dst_meta.uid() == src_meta.uid() && dst_meta.gid() == src_meta.gid() {
        return Ok(());
    }
    fchown(dst_file, Some(src_meta.uid()), Some(src_meta.gid()))
}

// =============================================================================
// Identity and cleanup
// =============================================================================

/// Check whether `dst` exists and is the same file as the source.
///
/// On Unix this compares device and inode, which also catches hard links.
/// Elsewhere it compares canonicalized paths.
#[cfg(unix)]
pub(crate) fn is_same_file(_src: &Path, src_meta: &Metadata, dst: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    match fs::metadata(dst) {
        Ok(dst_meta) => Ok(dst_meta.dev() == src_meta.dev() && dst_meta.ino() == src_meta.ino()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
pub(crate) fn is_same_file(src: &Path, _src_meta: &Metadata, dst: &Path) -> io::Result<bool> {
    match fs::canonicalize(dst) {
        Ok(dst_canonical) => Ok(fs::canonicalize(src)? == dst_canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Best-effort removal of a partially written destination.
///
/// Both file handles must already be closed.
pub(crate) fn remove_partial(dst: &Path) {
    match fs::remove_file(dst) {
        Ok(()) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %dst.display(), "removed partial destination");
        }
        Err(_e) if _e.kind() == io::ErrorKind::NotFound => {}
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(path = %dst.display(), error = %_e, "failed to remove partial destination");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
