//! Core copy operations.
//!
//! This module provides single file copies with optional chunked progress
//! reporting and cooperative cancellation.

pub(crate) mod chunked;
mod file;
pub(crate) mod utils;

// Re-export public API
pub use file::{copy_file, copy_file_with_progress};

pub(crate) use file::copy_file_internal;
