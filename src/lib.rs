//! # fsext
//!
//! Cross-platform file system extras: copying a single file with progress
//! and cancellation, volume labels, file name ordering and file timestamps.
//!
//! ## Core Features
//!
//! - **Progress callbacks**: `(bytes_copied, total_bytes)` after every chunk
//! - **Cooperative cancellation**: the callback answers [`Decision::Cancel`]
//!   and no partial destination is left behind
//! - **Metadata preserving**: permissions, timestamps and (best effort)
//!   ownership are reproduced on the copy
//! - **Native fast paths**: `copy_file_range` on Linux, `CopyFileExW` on Windows
//! - **Volume labels**: the label of the volume holding any path
//! - **Platform file name order**: case-sensitive on POSIX, case-insensitive
//!   on Windows
//! - **Timestamps**: set creation, modification and access times independently
//! - **System attribute**: tell Windows system files apart
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use fsext::{CopyBuilder, Decision};
//!
//! let outcome = CopyBuilder::new("video.mkv", "/media/usb")
//!     .on_progress(|copied, total| {
//!         eprint!("\r{copied}/{total}");
//!         Decision::Continue
//!     })
//!     .run()?;
//! println!("\ncopied to {:?}", outcome.destination());
//! # Ok::<(), fsext::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use fsext::{CopyOptions, FileTimestamps, copy_file, set_file_times, volume_label};
//! use std::path::Path;
//! use std::time::{Duration, UNIX_EPOCH};
//!
//! let options = CopyOptions::default()
//!     .without_ownership()   // Don't try chown
//!     .without_fsync();      // Faster but less durable
//! copy_file(Path::new("a.txt"), Path::new("b.txt"), &options)?;
//!
//! let times = FileTimestamps::new()
//!     .with_modified(UNIX_EPOCH + Duration::from_secs(1_700_000_000));
//! set_file_times(Path::new("b.txt"), &times)?;
//!
//! println!("on volume {}", volume_label(Path::new("b.txt")));
//! # Ok::<(), fsext::Error>(())
//! ```
//!
//! ## Platform Backends
//!
//! Exactly one backend is compiled in, chosen by target:
//!
//! | | POSIX | Windows |
//! |---|---|---|
//! | Name order | case-sensitive | case-insensitive |
//! | Copy | userspace, chunked when observed | `CopyFileExW` |
//! | Progress interval | `chunk_size` bytes | chosen by the system |
//! | Volume label | last component of the mount point | `GetVolumeInformationW` |
//! | Creation time | ignored | set |
//! | System attribute | always `false` | `GetFileAttributesW` |
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar support with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`], [`Decision`] and [`FileTimestamps`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod attributes;
mod builder;
mod copy;
mod error;
mod names;
mod options;
mod platform;
mod progress;
mod times;
mod utils;
mod volume;

pub use attributes::has_system_attribute;
pub use builder::CopyBuilder;
pub use copy::{copy_file, copy_file_with_progress};
pub use error::{Error, ErrorKind, Result};
pub use names::compare_names;
pub use options::{CopyOptions, DEFAULT_CHUNK_SIZE};
pub use progress::{CopyOutcome, Decision};
pub use times::{FileTimestamps, set_file_times};
pub use volume::{UNKNOWN_VOLUME_LABEL, VolumeLabel, volume_label};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::{create_progress_bar, progress_bar_callback};
