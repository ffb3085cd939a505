//! POSIX backend.
//!
//! - Names compare case-sensitively.
//! - Copies run in userspace: `copy_file_range` in bulk, or the chunked
//!   loop when a progress callback is present.
//! - Volume labels come from the kernel mount table (`/proc` on Linux,
//!   `statfs` on macOS and FreeBSD).
//! - There is no creation time; requests for it are ignored.

use std::cmp::Ordering;
use std::fs::{self, File, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use super::{Backend, ProgressFn, Transfer};
use crate::copy::chunked::copy_chunked;
use crate::copy::utils::{copy_file_contents, remove_partial, replicate_metadata};
use crate::error::Result;
use crate::names::compare_case_sensitive;
use crate::options::CopyOptions;
use crate::times::FileTimestamps;
use crate::volume::VolumeLabel;

/// Mount tables tried in order.
#[cfg(not(any(target_os = "macos", target_os = "freebsd")))]
const MOUNT_TABLES: &[&str] = &["/proc/self/mounts", "/proc/mounts"];

/// Label reported for the `/` mount.
const ROOT_LABEL: &str = "root";

pub(crate) struct PosixBackend;

impl Backend for PosixBackend {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn compare_names(&self, a: &str, b: &str) -> Ordering {
        compare_case_sensitive(a, b)
    }

    fn copy_file(
        &self,
        src: &Path,
        dst: &Path,
        src_meta: &Metadata,
        options: &CopyOptions,
        progress: Option<&mut ProgressFn<'_>>,
    ) -> io::Result<Transfer> {
        let mut src_file = File::open(src)?;
        let mut dst_file = File::create(dst)?;

        let result = write_destination(
            &mut src_file,
            &mut dst_file,
            dst,
            src_meta,
            options,
            progress,
        );

        // Release both handles before touching the destination again.
        drop(src_file);
        drop(dst_file);

        match result {
            Ok(Transfer::Complete) => Ok(Transfer::Complete),
            Ok(Transfer::Cancelled) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(dst = %dst.display(), "copy cancelled by progress callback");
                remove_partial(dst);
                Ok(Transfer::Cancelled)
            }
            Err(e) => {
                remove_partial(dst);
                Err(e)
            }
        }
    }

    fn volume_label(&self, path: &Path) -> VolumeLabel {
        let Ok(absolute) = std::path::absolute(path) else {
            return VolumeLabel::Unknown;
        };
        match mount_points(&absolute) {
            Ok(mounts) => label_for(&absolute, &mounts),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "mount table unavailable");
                VolumeLabel::Unknown
            }
        }
    }

    fn set_file_times(&self, path: &Path, times: &FileTimestamps) -> Result<()> {
        if times.created.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %path.display(), "creation time not supported, ignoring");
        }

        let (atime, mtime) = match (times.accessed, times.modified) {
            (None, None) => return Ok(()),
            (Some(accessed), Some(modified)) => (
                FileTime::from_system_time(accessed),
                FileTime::from_system_time(modified),
            ),
            (accessed, modified) => {
                // Only one of the pair is given: keep the other as it is on disk.
                let meta = fs::metadata(path)?;
                (
                    accessed.map_or_else(
                        || FileTime::from_last_access_time(&meta),
                        FileTime::from_system_time,
                    ),
                    modified.map_or_else(
                        || FileTime::from_last_modification_time(&meta),
                        FileTime::from_system_time,
                    ),
                )
            }
        };

        filetime::set_file_times(path, atime, mtime)?;
        Ok(())
    }

    fn has_system_attribute(&self, _path: &Path) -> bool {
        false
    }
}

/// Copy content, then sync and replicate metadata if the copy completed.
fn write_destination(
    src_file: &mut File,
    dst_file: &mut File,
    dst: &Path,
    src_meta: &Metadata,
    options: &CopyOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> io::Result<Transfer> {
    let transfer = match progress {
        None => {
            copy_file_contents(src_file, dst_file, src_meta.len())?;
            Transfer::Complete
        }
        Some(callback) => {
            copy_chunked(src_file, dst_file, src_meta.len(), options.chunk_size, callback)?
        }
    };

    if transfer == Transfer::Cancelled {
        return Ok(transfer);
    }

    if options.fsync {
        dst_file.sync_all()?;
    }
    replicate_metadata(src_meta, dst_file, dst, options)?;
    Ok(Transfer::Complete)
}

// =============================================================================
// Mount table
// =============================================================================

/// Mount points that may contain `path`.
#[cfg(not(any(target_os = "macos", target_os = "freebsd")))]
fn mount_points(_path: &Path) -> io::Result<Vec<PathBuf>> {
    read_mount_points()
}

/// The mount point of `path`, or of its nearest existing ancestor.
#[cfg(any(target_os = "macos", target_os = "freebsd"))]
fn mount_points(path: &Path) -> io::Result<Vec<PathBuf>> {
    use std::ffi::{CStr, CString, OsStr};
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let mut current = path;
    loop {
        let c_path = CString::new(current.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let mut stat = MaybeUninit::<libc::statfs>::uninit();
        // SAFETY: `c_path` is null-terminated and `stat` is a writable statfs.
        if unsafe { libc::statfs(c_path.as_ptr(), stat.as_mut_ptr()) } == 0 {
            // SAFETY: statfs succeeded, so `stat` is initialized and
            // `f_mntonname` holds a null-terminated string.
            let mount = unsafe {
                let stat = stat.assume_init();
                CStr::from_ptr(stat.f_mntonname.as_ptr()).to_bytes().to_vec()
            };
            return Ok(vec![PathBuf::from(OsStr::from_bytes(&mount))]);
        }
        let err = io::Error::last_os_error();
        match current.parent() {
            Some(parent) if err.kind() == io::ErrorKind::NotFound => current = parent,
            _ => return Err(err),
        }
    }
}

#[cfg(not(any(target_os = "macos", target_os = "freebsd")))]
fn read_mount_points() -> io::Result<Vec<PathBuf>> {
    let mut last_err = io::Error::from(io::ErrorKind::NotFound);
    for table in MOUNT_TABLES {
        match fs::read_to_string(table) {
            Ok(contents) => return Ok(parse_mount_points(&contents)),
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}

/// Extract the mount point column of a `/proc/mounts` style table.
#[cfg_attr(any(target_os = "macos", target_os = "freebsd"), allow(dead_code))]
fn parse_mount_points(table: &str) -> Vec<PathBuf> {
    table
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(|field| PathBuf::from(unescape_mount_field(field)))
        .collect()
}

/// Decode the `\ooo` octal escapes the kernel uses for blanks and
/// backslashes in mount table fields.
#[cfg_attr(any(target_os = "macos", target_os = "freebsd"), allow(dead_code))]
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let escaped = bytes
                .get(i + 1..i + 4)
                .filter(|digits| digits.iter().all(|d| (b'0'..=b'7').contains(d)))
                .and_then(|digits| std::str::from_utf8(digits).ok())
                .and_then(|digits| u8::from_str_radix(digits, 8).ok());
            if let Some(value) = escaped {
                out.push(value);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Pick the mount point that is the longest component-wise prefix of
/// `path` and turn it into a label.
fn label_for(path: &Path, mounts: &[PathBuf]) -> VolumeLabel {
    mounts
        .iter()
        .filter(|mount| path.starts_with(mount))
        .max_by_key(|mount| mount.components().count())
        .map_or(VolumeLabel::Unknown, |mount| match mount.file_name() {
            Some(name) => VolumeLabel::Named(name.to_string_lossy().into_owned()),
            None => VolumeLabel::Named(ROOT_LABEL.to_string()),
        })
}
