//! Windowed reads over a resolved byte range.
use std::io::{self, Read, Seek, SeekFrom};

use crate::bounds::ByteRange;

/// Size of the window every strategy reads the source through.
pub const WINDOW_SIZE: usize = 1024;

/// A reader restricted to one [`ByteRange`] of an underlying seekable source.
///
/// The range was validated against the file's length when it was resolved. If
/// the file shrinks afterwards, reads fail with
/// [`io::ErrorKind::UnexpectedEof`] instead of returning fewer bytes.
pub(crate) struct RangeSource<R> {
    inner: R,
    range: ByteRange,
    consumed: u64,
}

impl<R: Read + Seek> RangeSource<R> {
    pub(crate) fn new(mut inner: R, range: ByteRange) -> io::Result<Self> {
        inner.seek(SeekFrom::Start(range.start))?;
        Ok(Self {
            inner,
            range,
            consumed: 0,
        })
    }

    /// Total length of the range.
    pub(crate) const fn len(&self) -> u64 {
        self.range.len
    }

    /// Fills the front of `buf` with the next bytes of the range.
    ///
    /// Returns the number of bytes read, which is `buf.len()` unless the range
    /// ends first; `0` once the range is exhausted.
    pub(crate) fn read_window(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let left = self.range.len - self.consumed;
        let want = usize::try_from(left).map_or(buf.len(), |left| left.min(buf.len()));
        self.inner.read_exact(&mut buf[..want])?;
        self.consumed += want as u64;
        Ok(want)
    }

    /// Moves back to the start of the range.
    pub(crate) fn rewind(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(self.range.start))?;
        self.consumed = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_only_the_range() {
        let data: Vec<u8> = (0..=255).collect();
        let range = ByteRange { start: 10, len: 5 };
        let mut source = RangeSource::new(Cursor::new(data), range).unwrap();
        let mut buf = [0; 8];
        assert_eq!(source.read_window(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], &[10, 11, 12, 13, 14]);
        assert_eq!(source.read_window(&mut buf).unwrap(), 0);

        source.rewind().unwrap();
        let mut small = [0; 2];
        assert_eq!(source.read_window(&mut small).unwrap(), 2);
        assert_eq!(small, [10, 11]);
    }

    #[test]
    fn truncated_source_is_an_error() {
        let range = ByteRange { start: 0, len: 10 };
        let mut source = RangeSource::new(Cursor::new(vec![1, 2, 3]), range).unwrap();
        let mut buf = [0; WINDOW_SIZE];
        let err = source.read_window(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
