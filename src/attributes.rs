//! File attribute queries.

use std::path::Path;

use crate::platform;

/// Returns `true` if `path` has the Windows system attribute set.
///
/// Always `false` on platforms without such an attribute, and for paths
/// that do not exist or cannot be queried.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fsext::has_system_attribute;
///
/// if has_system_attribute(Path::new(r"C:\pagefile.sys")) {
///     println!("skipping system file");
/// }
/// ```
#[must_use]
pub fn has_system_attribute(path: &Path) -> bool {
    platform::current().has_system_attribute(path)
}
