//! Positioned reads for scanning a stream from its end
//!
//! The tail reader only needs "read these bytes at that offset". Anything
//! that is `Read + Seek` gets it for free; other sources (a memory map, a
//! remote object with range requests) can implement it directly.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

use crate::core::error::{ReadError, ReadResult};

/// A byte source that can be read at arbitrary offsets.
pub trait BackwardSource {
    /// Fill `buf` with the bytes starting at `pos`.
    ///
    /// Returns the number of bytes read, which is smaller than `buf.len()`
    /// only when the end of the source was reached.
    fn read_at(&mut self, pos: u64, buf: &mut [u8]) -> ReadResult<usize>;
}

impl<T: Read + Seek + ?Sized> BackwardSource for T {
    fn read_at(&mut self, pos: u64, buf: &mut [u8]) -> ReadResult<usize> {
        self.seek(SeekFrom::Start(pos))
            .map_err(|source| ReadError::Seek {
                offset: pos,
                source,
            })?;

        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

/// Read exactly `buf.len()` bytes at `pos`, failing if the source is shorter.
pub fn read_exact_at<S: BackwardSource + ?Sized>(
    source: &mut S,
    pos: u64,
    buf: &mut [u8],
) -> ReadResult<()> {
    let n = source.read_at(pos, buf)?;
    if n < buf.len() {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "stream ended at byte {} before its reported size",
                pos + n as u64
            ),
        )
        .into());
    }
    Ok(())
}
