//! Progress reporting and copy outcomes.
//!
//! A progress callback receives `(bytes_copied, total_bytes)` and answers
//! with a [`Decision`]. With the `progress` feature, [`create_progress_bar`]
//! and [`progress_bar_callback`] wire an indicatif bar into that shape.

use std::path::{Path, PathBuf};

/// Answer of a progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Keep copying.
    #[default]
    Continue,
    /// Stop the copy and remove the partially written destination.
    Cancel,
}

impl Decision {
    /// Returns `true` for [`Decision::Cancel`].
    #[inline]
    #[must_use]
    pub fn is_cancel(self) -> bool {
        self == Decision::Cancel
    }
}

/// Result of a copy that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a copy can be cancelled, check the outcome"]
pub enum CopyOutcome {
    /// The copy finished; holds the resolved destination path.
    Copied(PathBuf),
    /// The progress callback asked to stop. The destination does not exist.
    Cancelled,
}

impl CopyOutcome {
    /// Returns `true` if the copy was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CopyOutcome::Cancelled)
    }

    /// The resolved destination, if the copy finished.
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        match self {
            CopyOutcome::Copied(path) => Some(path),
            CopyOutcome::Cancelled => None,
        }
    }

    /// Consume the outcome and return the destination, if any.
    #[must_use]
    pub fn into_destination(self) -> Option<PathBuf> {
        match self {
            CopyOutcome::Copied(path) => Some(path),
            CopyOutcome::Cancelled => None,
        }
    }
}

#[cfg(feature = "progress")]
pub use bar::{create_progress_bar, progress_bar_callback};

#[cfg(feature = "progress")]
mod bar {
    use super::Decision;
    use indicatif::{ProgressBar, ProgressStyle};

    /// Create a default progress bar for a single file copy
    #[must_use]
    pub fn create_progress_bar(total_bytes: u64) -> ProgressBar {
        let pb = ProgressBar::new(total_bytes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    }

    /// Build a progress callback that drives `pb` and never cancels.
    pub fn progress_bar_callback(pb: &ProgressBar) -> impl FnMut(u64, u64) -> Decision + '_ {
        move |copied, total| {
            pb.set_length(total);
            pb.set_position(copied);
            Decision::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_default_is_continue() {
        assert_eq!(Decision::default(), Decision::Continue);
        assert!(!Decision::Continue.is_cancel());
        assert!(Decision::Cancel.is_cancel());
    }

    #[test]
    fn test_outcome_accessors() {
        let copied = CopyOutcome::Copied(PathBuf::from("/tmp/out.bin"));
        assert!(!copied.is_cancelled());
        assert_eq!(copied.destination(), Some(Path::new("/tmp/out.bin")));
        assert_eq!(copied.into_destination(), Some(PathBuf::from("/tmp/out.bin")));

        let cancelled = CopyOutcome::Cancelled;
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.destination(), None);
    }

    #[cfg(feature = "progress")]
    #[test]
    fn test_progress_bar_callback_tracks_position() {
        let pb = indicatif::ProgressBar::hidden();
        {
            let mut cb = progress_bar_callback(&pb);
            assert_eq!(cb(10, 100), Decision::Continue);
            assert_eq!(cb(60, 100), Decision::Continue);
        }
        assert_eq!(pb.position(), 60);
        assert_eq!(pb.length(), Some(100));
    }
}
