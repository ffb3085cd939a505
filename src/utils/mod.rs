//! Internal helpers shared across modules.

pub(crate) mod path;
