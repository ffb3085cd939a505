//! Builder API for ergonomic copying operations.
//!
//! The builder pattern provides a fluent interface for configuring and executing
//! a copy. This is often more convenient than manually constructing
//! [`CopyOptions`] and picking between [`copy_file`](crate::copy_file) and
//! [`copy_file_with_progress`](crate::copy_file_with_progress).
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use fsext::CopyBuilder;
//!
//! let outcome = CopyBuilder::new("notes.txt", "backup/").run()?;
//! println!("Copied to {:?}", outcome.destination());
//! # Ok::<(), fsext::Error>(())
//! ```
//!
//! ## With Progress and Cancellation
//!
//! ```no_run
//! use fsext::{CopyBuilder, Decision};
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! static STOP: AtomicBool = AtomicBool::new(false);
//!
//! let outcome = CopyBuilder::new("disk.img", "/mnt/usb/disk.img")
//!     .chunk_size(8 * 1024 * 1024)
//!     .on_progress(|copied, total| {
//!         eprint!("\r{copied}/{total}");
//!         if STOP.load(Ordering::Relaxed) {
//!             Decision::Cancel
//!         } else {
//!             Decision::Continue
//!         }
//!     })
//!     .run()?;
//!
//! if outcome.is_cancelled() {
//!     eprintln!("\ncancelled, nothing left behind");
//! }
//! # Ok::<(), fsext::Error>(())
//! ```

use crate::copy::copy_file_internal;
use crate::error::Result;
use crate::options::CopyOptions;
use crate::platform::ProgressFn;
use crate::progress::{CopyOutcome, Decision};
use std::fmt;
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a single file copy.
///
/// The lifetime `'a` is that of the progress callback, which may borrow
/// from the caller's stack.
///
/// # Example
///
/// ```no_run
/// use fsext::CopyBuilder;
///
/// let outcome = CopyBuilder::new("/data/report.pdf", "/backup")
///     .no_fsync()
///     .no_ownership()
///     .run()?;
/// # Ok::<(), fsext::Error>(())
/// ```
pub struct CopyBuilder<'a> {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
    progress: Option<Box<ProgressFn<'a>>>,
}

impl fmt::Debug for CopyBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyBuilder")
            .field("src", &self.src)
            .field("dst", &self.dst)
            .field("options", &self.options)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl<'a> CopyBuilder<'a> {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options: 4 MiB chunks, fsync, and permissions,
    /// timestamps and ownership preserved.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
            progress: None,
        }
    }

    /// Set the number of bytes between progress callbacks.
    ///
    /// Values below 1 are raised to 1. Has no effect on Windows, where the
    /// system copy engine chooses its own interval.
    #[must_use]
    pub fn chunk_size(mut self, bytes: u64) -> Self {
        self.options = self.options.with_chunk_size(bytes);
        self
    }

    /// Report progress to `callback` and let it cancel the copy.
    ///
    /// See [`copy_file_with_progress`](crate::copy_file_with_progress) for
    /// the calling contract.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fsext::{CopyBuilder, Decision};
    ///
    /// let mut calls = 0;
    /// let outcome = CopyBuilder::new("a.bin", "b.bin")
    ///     .on_progress(|_, _| {
    ///         calls += 1;
    ///         Decision::Continue
    ///     })
    ///     .run()?;
    /// println!("{calls} progress reports");
    /// # Ok::<(), fsext::Error>(())
    /// ```
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(u64, u64) -> Decision + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Disable fsync after writing the destination.
    ///
    /// Faster but less durable: data may be lost on power failure.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Don't preserve modification and access times.
    #[must_use]
    pub fn no_timestamps(mut self) -> Self {
        self.options = self.options.without_timestamps();
        self
    }

    /// Don't preserve permission bits (Unix) or the read-only attribute (Windows).
    #[must_use]
    pub fn no_permissions(mut self) -> Self {
        self.options = self.options.without_permissions();
        self
    }

    /// Don't try to copy owner and group. Only meaningful on Unix.
    #[must_use]
    pub fn no_ownership(mut self) -> Self {
        self.options = self.options.without_ownership();
        self
    }

    /// Send non-fatal warnings (e.g. a failed `chown`) to `handler`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fsext::CopyBuilder;
    ///
    /// let outcome = CopyBuilder::new("src.txt", "dst.txt")
    ///     .warn_handler(|msg| eprintln!("warning: {msg}"))
    ///     .run()?;
    /// # Ok::<(), fsext::Error>(())
    /// ```
    #[must_use]
    pub fn warn_handler(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Get the current options (for inspection).
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// # Errors
    ///
    /// Same as [`copy_file`](crate::copy_file).
    pub fn run(mut self) -> Result<CopyOutcome> {
        copy_file_internal(
            &self.src,
            &self.dst,
            &self.options,
            self.progress.as_deref_mut(),
        )
    }
}
