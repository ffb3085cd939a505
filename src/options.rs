//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`] for configuring how a single file
//! is copied.
//!
//! # Example
//!
//! ```
//! use fsext::CopyOptions;
//!
//! // Create options with builder pattern
//! let options = CopyOptions::default()
//!     .with_chunk_size(64 * 1024)
//!     .without_fsync();
//! ```

/// Default number of bytes copied between two progress callbacks (4 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 4_194_304;

/// Options for copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `chunk_size` | 4 MiB | Bytes between progress callbacks |
/// | `preserve_permissions` | `true` | Copy file permissions |
/// | `preserve_timestamps` | `true` | Copy file timestamps (mtime/atime) |
/// | `preserve_ownership` | `true` | Copy uid/gid (Unix, best effort) |
/// | `fsync` | `true` | Sync to disk after write |
///
/// # Example
///
/// ```
/// use fsext::CopyOptions;
///
/// let options = CopyOptions::default()
///     .with_chunk_size(1024 * 1024) // Report progress every MiB
///     .without_ownership();         // Keep the copy owned by the caller
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct CopyOptions {
    /// Number of bytes read and written between two progress callbacks
    /// (default: 4 MiB)
    ///
    /// Only the chunked userspace copy honors this value. The Windows
    /// native copy reports progress at intervals chosen by the OS.
    /// Must be greater than zero.
    pub chunk_size: u64,

    /// Whether to preserve file permissions (default: true)
    pub preserve_permissions: bool,

    /// Whether to preserve file timestamps (default: true)
    ///
    /// When enabled, the modification time (mtime) and access time (atime)
    /// of the copy are set to match the source.
    pub preserve_timestamps: bool,

    /// Whether to preserve file ownership (default: true)
    ///
    /// Unix only. Changing the owner usually requires privileges, so a
    /// failure is reported as a warning and does not fail the copy.
    /// Ignored on Windows.
    pub preserve_ownership: bool,

    /// Whether to sync the destination to disk after writing (default: true)
    ///
    /// Applies to the userspace copy paths. The Windows native copy
    /// manages its own buffering.
    pub fsync: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_permissions: true,
            preserve_timestamps: true,
            preserve_ownership: true,
            fsync: true,
            warn_handler: None,
        }
    }
}

impl CopyOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the number of bytes copied between progress callbacks
    ///
    /// Value is clamped to at least 1. Setting the public field to 0
    /// directly is rejected by the copy functions.
    #[must_use]
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Disable timestamp preservation
    ///
    /// The copy then carries the time it was written.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.preserve_timestamps = false;
        self
    }

    /// Disable permission preservation
    ///
    /// The copy gets the default permissions (umask applied on Unix).
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    /// Disable ownership preservation
    #[must_use]
    pub fn without_ownership(mut self) -> Self {
        self.preserve_ownership = false;
        self
    }

    #[cfg_attr(windows, allow(dead_code))]
    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
