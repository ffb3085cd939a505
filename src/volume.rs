//! Volume label lookup.

use std::fmt;
use std::path::Path;

use crate::platform;

/// Text shown for a volume that could not be identified.
pub const UNKNOWN_VOLUME_LABEL: &str = "???";

/// Label of the storage volume that contains a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VolumeLabel {
    /// The volume was identified.
    ///
    /// On Windows this is the label set on the drive (possibly empty). On
    /// POSIX systems it is the last component of the mount point, or
    /// `root` for `/`.
    Named(String),
    /// No volume could be determined for the path.
    Unknown,
}

impl VolumeLabel {
    /// The label text, or [`UNKNOWN_VOLUME_LABEL`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            VolumeLabel::Named(name) => name,
            VolumeLabel::Unknown => UNKNOWN_VOLUME_LABEL,
        }
    }

    /// Returns `true` if the volume was identified.
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, VolumeLabel::Named(_))
    }
}

impl fmt::Display for VolumeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the label of the volume containing `path`.
///
/// The path does not need to exist as long as the volume it would live on
/// can be determined. Lookup failures never surface as errors; they yield
/// [`VolumeLabel::Unknown`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fsext::volume_label;
///
/// println!("{}", volume_label(Path::new("/media/usb/photos")));
/// ```
#[must_use]
pub fn volume_label(path: &Path) -> VolumeLabel {
    platform::current().volume_label(path)
}
