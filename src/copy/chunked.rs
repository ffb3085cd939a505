//! Chunked copy with progress reporting.
//!
//! Used by backends that have no native progress facility. The loop reads
//! one chunk, writes it, then asks the callback whether to go on, so
//! cancellation is observed at chunk boundaries only.

use std::io::{self, Read, Write};

use crate::platform::{ProgressFn, Transfer};

/// Copy `src` into `dst` in chunks of `chunk_size` bytes.
///
/// After each chunk is written, `progress(copied, total)` is called.
/// `total` is the expected size; it is raised to `copied` if the source
/// turns out to be longer so that `copied <= total` always holds.
///
/// Returns [`Transfer::Cancelled`] as soon as the callback cancels. The
/// caller owns cleanup of the destination.
#[cfg_attr(windows, allow(dead_code))]
pub(crate) fn copy_chunked<R, W>(
    src: &mut R,
    dst: &mut W,
    total: u64,
    chunk_size: u64,
    progress: &mut ProgressFn<'_>,
) -> io::Result<Transfer>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    debug_assert!(chunk_size > 0);

    // Start from the expected size and grow up to `chunk_size` only if the
    // source turns out to be longer than it stat'ed.
    let limit = usize::try_from(chunk_size).unwrap_or(usize::MAX);
    let initial = usize::try_from(chunk_size.min(total.max(1))).unwrap_or(limit);
    let mut buf = vec![0u8; initial];
    let mut copied: u64 = 0;

    loop {
        let n = read_chunk(src, &mut buf, limit)?;
        if n == 0 {
            break;
        }
        dst.write_all(&buf[..n])?;
        copied += n as u64;

        if progress(copied, total.max(copied)).is_cancel() {
            return Ok(Transfer::Cancelled);
        }
    }

    dst.flush()?;
    Ok(Transfer::Complete)
}

/// Read up to `limit` bytes from `src` into `buf`, stopping early only at
/// end of input. `buf` is doubled (capped at `limit`) whenever it fills up.
fn read_chunk<R: Read + ?Sized>(
    src: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> io::Result<usize> {
    let mut filled = 0;
    loop {
        if filled == buf.len() {
            if buf.len() >= limit {
                break;
            }
            let grown = buf.len().saturating_mul(2).clamp(1, limit);
            buf.resize(grown, 0);
        }
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
