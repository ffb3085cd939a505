//! Filename ordering.
//!
//! Names are compared as plain strings, with no path normalization. The
//! active backend decides whether case matters: POSIX file systems are
//! case-sensitive, Windows ones are not.

use std::cmp::Ordering;

use crate::platform;

/// Compare two filenames the way the host file system orders them.
///
/// The comparison is lexicographic over the full string as given. The
/// empty string sorts before any non-empty one. `Ordering as i32` gives
/// `-1`, `0` or `1`.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use fsext::compare_names;
///
/// assert_eq!(compare_names("file1.txt", "file2.txt"), Ordering::Less);
/// assert_eq!(compare_names("", "a"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    platform::current().compare_names(a, b)
}

/// Unicode scalar order, as used by POSIX backends.
#[cfg_attr(windows, allow(dead_code))]
#[inline]
pub(crate) fn compare_case_sensitive(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Order of the lower-cased scalar sequences, as used on Windows.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    let lower_a = a.chars().flat_map(char::to_lowercase);
    let lower_b = b.chars().flat_map(char::to_lowercase);
    lower_a.cmp(lower_b)
}
