//! Windows backend.
//!
//! - Names compare case-insensitively.
//! - Copies go through `CopyFileExW`, which also carries attributes and
//!   timestamps. Progress is reported at intervals the OS picks, so
//!   [`CopyOptions::chunk_size`] does not apply.
//! - Volume labels come from `GetVolumeInformationW` on the drive root.
//! - Timestamps are written with `SetFileTime`, creation time included.
//! - The system attribute is read with `GetFileAttributesW`.

use std::any::Any;
use std::cmp::Ordering;
use std::ffi::c_void;
use std::fs::{self, Metadata, OpenOptions};
use std::io;
use std::os::windows::ffi::OsStrExt;
use std::os::windows::fs::OpenOptionsExt;
use std::os::windows::io::AsRawHandle;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use windows::Win32::Foundation::{ERROR_REQUEST_ABORTED, FILETIME, HANDLE, MAX_PATH};
use windows::Win32::Storage::FileSystem::{
    COPYFILE_FLAGS, COPYPROGRESS_ROUTINE_RESULT, CopyFileExW, FILE_ATTRIBUTE_SYSTEM,
    FILE_FLAG_BACKUP_SEMANTICS, FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE,
    FILE_WRITE_ATTRIBUTES, GetFileAttributesW, GetVolumeInformationW, INVALID_FILE_ATTRIBUTES,
    LPPROGRESS_ROUTINE_CALLBACK_REASON, PROGRESS_CANCEL, PROGRESS_CONTINUE, SetFileTime,
};
use windows::core::PCWSTR;

use super::{Backend, ProgressFn, Transfer};
use crate::copy::utils::remove_partial;
use crate::error::{Error, Result};
use crate::names::compare_case_insensitive;
use crate::options::CopyOptions;
use crate::progress::Decision;
use crate::times::{FileTimestamps, filetime_ticks};
use crate::utils::path::{path_to_wide, to_extended_length_path};
use crate::volume::VolumeLabel;

pub(crate) struct WindowsBackend;

impl Backend for WindowsBackend {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn compare_names(&self, a: &str, b: &str) -> Ordering {
        compare_case_insensitive(a, b)
    }

    fn copy_file(
        &self,
        src: &Path,
        dst: &Path,
        src_meta: &Metadata,
        options: &CopyOptions,
        progress: Option<&mut ProgressFn<'_>>,
    ) -> io::Result<Transfer> {
        let transfer = native_copy(src, dst, src_meta.len(), progress)?;
        if transfer == Transfer::Complete {
            if let Err(e) = undo_native_metadata(dst, options) {
                remove_partial(dst);
                return Err(e);
            }
        }
        Ok(transfer)
    }

    fn volume_label(&self, path: &Path) -> VolumeLabel {
        let Some(root) = std::path::absolute(path).ok().and_then(|p| volume_root(&p)) else {
            return VolumeLabel::Unknown;
        };
        let root_wide: Vec<u16> = root.as_os_str().encode_wide().chain(Some(0)).collect();
        let mut name = [0u16; MAX_PATH as usize + 1];

        // SAFETY: `root_wide` is a valid null-terminated wide string and
        // `name` is a writable buffer whose length is passed along.
        let result = unsafe {
            GetVolumeInformationW(
                PCWSTR(root_wide.as_ptr()),
                Some(&mut name[..]),
                None,
                None,
                None,
                None,
            )
        };

        match result {
            Ok(()) => {
                let len = name.iter().position(|&c| c == 0).unwrap_or(name.len());
                VolumeLabel::Named(String::from_utf16_lossy(&name[..len]))
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(root = %root.display(), error = %_e, "volume information unavailable");
                VolumeLabel::Unknown
            }
        }
    }

    fn set_file_times(&self, path: &Path, times: &FileTimestamps) -> Result<()> {
        let created = times.created.map(to_filetime).transpose()?;
        let accessed = times.accessed.map(to_filetime).transpose()?;
        let modified = times.modified.map(to_filetime).transpose()?;

        let file = OpenOptions::new()
            .access_mode(FILE_WRITE_ATTRIBUTES.0)
            .share_mode(FILE_SHARE_READ.0 | FILE_SHARE_WRITE.0 | FILE_SHARE_DELETE.0)
            .custom_flags(FILE_FLAG_BACKUP_SEMANTICS.0)
            .open(to_extended_length_path(path))?;

        // SAFETY: the handle stays open for the duration of the call and
        // every pointer refers to a live local FILETIME.
        unsafe {
            SetFileTime(
                HANDLE(file.as_raw_handle()),
                created.as_ref().map(|t| t as *const FILETIME),
                accessed.as_ref().map(|t| t as *const FILETIME),
                modified.as_ref().map(|t| t as *const FILETIME),
            )
        }
        .map_err(io::Error::from)?;

        Ok(())
    }

    fn has_system_attribute(&self, path: &Path) -> bool {
        let wide = path_to_wide(path);
        // SAFETY: `wide` is a valid null-terminated wide string.
        let attrs = unsafe { GetFileAttributesW(PCWSTR(wide.as_ptr())) };
        attrs != INVALID_FILE_ATTRIBUTES && attrs & FILE_ATTRIBUTE_SYSTEM.0 != 0
    }
}

/// Convert to a FILETIME, rejecting times the format cannot hold.
fn to_filetime(time: SystemTime) -> Result<FILETIME> {
    let ticks = filetime_ticks(time).ok_or_else(|| {
        Error::invalid_argument(format!(
            "timestamp {:?} cannot be represented as a Windows file time",
            time
        ))
    })?;
    Ok(FILETIME {
        dwLowDateTime: ticks as u32,
        dwHighDateTime: (ticks >> 32) as u32,
    })
}

/// `C:\` for `C:\dir\file`, `\\server\share\` for UNC paths.
fn volume_root(path: &Path) -> Option<PathBuf> {
    match path.components().next()? {
        Component::Prefix(prefix) => {
            let mut root = PathBuf::from(prefix.as_os_str());
            root.push(r"\");
            Some(root)
        }
        _ => None,
    }
}

/// `CopyFileExW` always carries attributes and the modification time.
/// Drop them again when the options say so.
fn undo_native_metadata(dst: &Path, options: &CopyOptions) -> io::Result<()> {
    if !options.preserve_permissions {
        let mut perms = fs::metadata(dst)?.permissions();
        if perms.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            fs::set_permissions(dst, perms)?;
        }
    }
    if !options.preserve_timestamps {
        let now = filetime::FileTime::now();
        filetime::set_file_times(dst, now, now)?;
    }
    Ok(())
}

// =============================================================================
// Native copy with progress adapter
// =============================================================================

/// Bridges the `LPPROGRESS_ROUTINE` hook of `CopyFileExW` to a
/// [`ProgressFn`].
struct ProgressAdapter<'a, 'b> {
    callback: &'a mut ProgressFn<'b>,
    total: u64,
    copied: u64,
    panic: Option<Box<dyn Any + Send>>,
}

impl ProgressAdapter<'_, '_> {
    fn on_progress(&mut self, transferred: i64) -> COPYPROGRESS_ROUTINE_RESULT {
        if self.panic.is_some() {
            return PROGRESS_CANCEL;
        }

        self.copied = self.copied.max(u64::try_from(transferred).unwrap_or(0));
        let copied = self.copied;
        let total = self.total.max(copied);
        let callback = &mut *self.callback;

        // Unwinding out of an `extern "system"` function aborts the process.
        match panic::catch_unwind(AssertUnwindSafe(|| callback(copied, total))) {
            Ok(Decision::Continue) => PROGRESS_CONTINUE,
            Ok(Decision::Cancel) => PROGRESS_CANCEL,
            Err(payload) => {
                self.panic = Some(payload);
                PROGRESS_CANCEL
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
unsafe extern "system" fn progress_routine(
    _total_file_size: i64,
    total_bytes_transferred: i64,
    _stream_size: i64,
    _stream_bytes_transferred: i64,
    _stream_number: u32,
    _reason: LPPROGRESS_ROUTINE_CALLBACK_REASON,
    _source: HANDLE,
    _destination: HANDLE,
    data: *const c_void,
) -> COPYPROGRESS_ROUTINE_RESULT {
    // SAFETY: `data` is the `ProgressAdapter` handed to CopyFileExW by
    // `native_copy`. It outlives the call and nothing else touches it while
    // the copy runs.
    let adapter = unsafe { &mut *(data as *mut ProgressAdapter<'_, '_>) };
    adapter.on_progress(total_bytes_transferred)
}

fn native_copy(
    src: &Path,
    dst: &Path,
    total: u64,
    progress: Option<&mut ProgressFn<'_>>,
) -> io::Result<Transfer> {
    let src_wide = path_to_wide(src);
    let dst_wide = path_to_wide(dst);

    let result = match progress {
        None => {
            // SAFETY: both paths are valid null-terminated wide strings.
            unsafe {
                CopyFileExW(
                    PCWSTR(src_wide.as_ptr()),
                    PCWSTR(dst_wide.as_ptr()),
                    None,
                    None,
                    None,
                    COPYFILE_FLAGS(0),
                )
            }
        }
        Some(callback) => {
            let mut adapter = ProgressAdapter {
                callback,
                total,
                copied: 0,
                panic: None,
            };
            // SAFETY: both paths are valid null-terminated wide strings and
            // `adapter` lives on this frame until CopyFileExW returns.
            let result = unsafe {
                CopyFileExW(
                    PCWSTR(src_wide.as_ptr()),
                    PCWSTR(dst_wide.as_ptr()),
                    Some(progress_routine),
                    Some(&mut adapter as *mut ProgressAdapter<'_, '_> as *const c_void),
                    None,
                    COPYFILE_FLAGS(0),
                )
            };
            if let Some(payload) = adapter.panic.take() {
                remove_partial(dst);
                panic::resume_unwind(payload);
            }
            result
        }
    };

    match result {
        Ok(()) => Ok(Transfer::Complete),
        Err(e) if e.code() == ERROR_REQUEST_ABORTED.to_hresult() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(dst = %dst.display(), "copy cancelled by progress callback");
            // CopyFileExW deletes its output on cancel; this covers the rest.
            remove_partial(dst);
            Ok(Transfer::Cancelled)
        }
        Err(e) => Err(io::Error::from(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_volume_root() {
        assert_eq!(
            volume_root(Path::new(r"C:\Users\me\file.txt")),
            Some(PathBuf::from(r"C:\"))
        );
        assert_eq!(
            volume_root(Path::new(r"\\server\share\dir")),
            Some(PathBuf::from(r"\\server\share\"))
        );
        assert_eq!(volume_root(Path::new(r"relative\dir")), None);
    }

    #[test]
    fn test_to_filetime_splits_ticks() {
        let ft = to_filetime(UNIX_EPOCH).unwrap();
        let ticks = (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime);
        assert_eq!(ticks, 116_444_736_000_000_000);
    }

    #[test]
    fn test_to_filetime_rejects_pre_1601() {
        let ancient = UNIX_EPOCH - Duration::from_secs(11_644_473_601);
        assert!(matches!(to_filetime(ancient), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_adapter_translates_decisions() {
        let mut seen = Vec::new();
        let mut cb = |copied: u64, total: u64| {
            seen.push((copied, total));
            if copied >= 50 {
                Decision::Cancel
            } else {
                Decision::Continue
            }
        };
        let mut adapter = ProgressAdapter {
            callback: &mut cb,
            total: 100,
            copied: 0,
            panic: None,
        };

        assert_eq!(adapter.on_progress(0), PROGRESS_CONTINUE);
        assert_eq!(adapter.on_progress(40), PROGRESS_CONTINUE);
        // A stale lower value never moves progress backwards
        assert_eq!(adapter.on_progress(30), PROGRESS_CONTINUE);
        assert_eq!(adapter.on_progress(60), PROGRESS_CANCEL);
        drop(adapter);

        assert_eq!(seen, vec![(0, 100), (40, 100), (40, 100), (60, 100)]);
    }

    #[test]
    fn test_adapter_catches_panics() {
        let mut cb = |_: u64, _: u64| -> Decision { panic!("boom") };
        let mut adapter = ProgressAdapter {
            callback: &mut cb,
            total: 10,
            copied: 0,
            panic: None,
        };

        assert_eq!(adapter.on_progress(5), PROGRESS_CANCEL);
        assert!(adapter.panic.is_some());
        assert_eq!(adapter.on_progress(6), PROGRESS_CANCEL);
    }

    #[test]
    fn test_system_attribute() {
        use windows::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_NORMAL, SetFileAttributesW};

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pagefile.sys");
        fs::write(&file, "x").unwrap();
        assert!(!WindowsBackend.has_system_attribute(&file));

        let wide = path_to_wide(&file);
        unsafe { SetFileAttributesW(PCWSTR(wide.as_ptr()), FILE_ATTRIBUTE_SYSTEM) }.unwrap();
        assert!(WindowsBackend.has_system_attribute(&file));

        unsafe { SetFileAttributesW(PCWSTR(wide.as_ptr()), FILE_ATTRIBUTE_NORMAL) }.unwrap();
        assert!(!WindowsBackend.has_system_attribute(&file));
        assert!(!WindowsBackend.has_system_attribute(&dir.path().join("missing")));
    }

    #[test]
    fn test_volume_label_of_system_drive_is_known() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WindowsBackend.volume_label(dir.path()).is_known());
    }
}
