//! Path utilities for cross-platform compatibility.
//!
//! This module resolves copy destinations and, on Windows, prepares paths
//! for the wide-character Win32 APIs including long path support.

use std::path::{Path, PathBuf};

/// Resolve the effective copy destination.
///
/// If `dst` is an existing directory the source file name is appended to
/// it, otherwise `dst` is the target file itself. Returns `None` if `src`
/// has no file name.
pub(crate) fn resolve_destination(src: &Path, dst: &Path) -> Option<PathBuf> {
    if dst.is_dir() {
        src.file_name().map(|name| dst.join(name))
    } else {
        Some(dst.to_path_buf())
    }
}

/// Convert a path to an extended-length path format on Windows.
///
/// On Windows, the default maximum path length is 260 characters (MAX_PATH).
/// By using the extended-length path syntax (prefixing with `\\?\`), paths
/// can be up to 32,767 characters.
///
/// The conversion follows these rules:
/// - Absolute paths like `C:\path` become `\\?\C:\path`
/// - UNC paths like `\\server\share\path` become `\\?\UNC\server\share\path`
/// - Relative paths are first made absolute against the current directory
#[cfg(windows)]
pub(crate) fn to_extended_length_path(path: &Path) -> PathBuf {
    let path_str = path.as_os_str().to_string_lossy();
    if path_str.starts_with(r"\\?\") {
        return path.to_path_buf();
    }

    if let Some(unc) = path_str.strip_prefix(r"\\") {
        return PathBuf::from(format!(r"\\?\UNC\{}", unc));
    }

    // The verbatim prefix disables `..` and `/` handling, so the path has
    // to be absolute and normalized first.
    let absolute_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    PathBuf::from(format!(r"\\?\{}", absolute_path.display()))
}

/// Convert a Path to a null-terminated wide string for Win32 API.
///
/// The path is converted to extended-length format first.
#[cfg(windows)]
pub(crate) fn path_to_wide(path: &Path) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;

    to_extended_length_path(path)
        .as_os_str()
        .encode_wide()
        .chain(Some(0))
        .collect()
}
