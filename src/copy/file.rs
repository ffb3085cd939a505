//! Single file copy operations.
//!
//! This module validates copy requests, resolves the destination and hands
//! the copy to the platform backend.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::platform::{self, ProgressFn, Transfer};
use crate::progress::{CopyOutcome, Decision};
use crate::utils::path::resolve_destination;
use std::fs;
use std::path::Path;

use super::utils::is_same_file;

/// Copy a single file.
///
/// If `dst` is an existing directory the file is copied into it under its
/// own name; otherwise `dst` is the target file, which is overwritten if
/// present. Missing parent directories are created. Permissions,
/// timestamps and (on Unix, best effort) ownership are reproduced according
/// to `options`.
///
/// # Returns
///
/// [`CopyOutcome::Copied`] with the resolved destination path. Without a
/// progress callback a copy is never cancelled.
///
/// # Errors
///
/// Returns an error if:
/// - Source is missing or not a regular file ([`Error::SourceNotFound`])
/// - `options.chunk_size` is zero ([`Error::InvalidArgument`])
/// - Source and resolved destination are the same file ([`Error::SameFile`])
/// - IO operations fail ([`Error::Io`])
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fsext::{CopyOptions, copy_file};
///
/// let outcome = copy_file(Path::new("a/foo.txt"), Path::new("b"), &CopyOptions::default())?;
/// assert_eq!(outcome.destination(), Some(Path::new("b/foo.txt")));
/// # Ok::<(), fsext::Error>(())
/// ```
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyOutcome> {
    copy_file_internal(src, dst, options, None)
}

/// Copy a single file, reporting progress to `progress`.
///
/// `progress(copied, total)` is called zero or more times with a
/// non-decreasing `copied` that never exceeds `total`. The POSIX backend
/// calls it after every `options.chunk_size` bytes; on Windows the native
/// copy engine picks the interval. Returning [`Decision::Cancel`] stops the
/// copy, removes the partial destination and yields
/// [`CopyOutcome::Cancelled`].
///
/// # Errors
///
/// Same as [`copy_file`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fsext::{CopyOptions, Decision, copy_file_with_progress};
///
/// let options = CopyOptions::default().with_chunk_size(1024 * 1024);
/// let outcome = copy_file_with_progress(
///     Path::new("big.iso"),
///     Path::new("/mnt/backup"),
///     &options,
///     |copied, total| {
///         println!("{copied}/{total}");
///         Decision::Continue
///     },
/// )?;
/// if outcome.is_cancelled() {
///     println!("cancelled");
/// }
/// # Ok::<(), fsext::Error>(())
/// ```
pub fn copy_file_with_progress<F>(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
    mut progress: F,
) -> Result<CopyOutcome>
where
    F: FnMut(u64, u64) -> Decision,
{
    let progress: &mut ProgressFn<'_> = &mut progress;
    copy_file_internal(src, dst, options, Some(progress))
}

/// Shared implementation behind the public copy functions and the builder.
pub(crate) fn copy_file_internal(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
    progress: Option<&mut ProgressFn<'_>>,
) -> Result<CopyOutcome> {
    // Any stat failure means there is no regular file to copy
    let src_meta = match fs::metadata(src) {
        Ok(meta) if meta.is_file() => meta,
        _ => return Err(Error::SourceNotFound(src.to_path_buf())),
    };

    if options.chunk_size == 0 {
        return Err(Error::invalid_argument(
            "chunk size must be greater than zero",
        ));
    }

    let dst = resolve_destination(src, dst)
        .ok_or_else(|| Error::SourceNotFound(src.to_path_buf()))?;

    if is_same_file(src, &src_meta, &dst)? {
        return Err(Error::SameFile {
            src: src.to_path_buf(),
            dst,
        });
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let backend = platform::current();
    #[cfg(feature = "tracing")]
    tracing::debug!(
        backend = backend.name(),
        src = %src.display(),
        dst = %dst.display(),
        bytes = src_meta.len(),
        with_progress = progress.is_some(),
        "copying file"
    );

    match backend.copy_file(src, &dst, &src_meta, options, progress)? {
        Transfer::Complete => Ok(CopyOutcome::Copied(dst)),
        Transfer::Cancelled => Ok(CopyOutcome::Cancelled),
    }
}

// =============================================================================
// Tests
// =============================================================================
