//! Resolution of an `(offset, length)` request against a real file.
use crate::diagnostic::Diagnostic;

/// The maximum number of bytes embedded when no override is given (1 MiB).
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

/// A bounds-checked range of a file.
///
/// `start < file_len` and `start + len <= file_len` hold for every value
/// produced by [`ByteRange::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub len: u64,
}

impl ByteRange {
    /// Checks a request against the actual file length.
    ///
    /// `length` of `None` means "to the end of the file"; `max_size` of `None`
    /// means [`DEFAULT_MAX_SIZE`].
    ///
    /// # Errors
    /// Returns the single diagnostic describing the first violated bound.
    pub fn resolve(
        offset: u64,
        length: Option<u64>,
        max_size: Option<u64>,
        file_len: u64,
    ) -> Result<Self, Diagnostic> {
        if offset >= file_len {
            return Err(Diagnostic::OffsetPastEnd { offset, file_len });
        }
        let max = max_size.unwrap_or(DEFAULT_MAX_SIZE);

        let len = match length {
            None => file_len - offset,
            Some(length) => {
                if offset.checked_add(length).is_none_or(|end| end > file_len) {
                    return Err(Diagnostic::OffsetPlusLengthPastEnd {
                        offset,
                        length,
                        file_len,
                    });
                }
                length
            }
        };
        if len > max {
            return Err(Diagnostic::ExceedsMaxLength { length: len, max });
        }

        Ok(Self { start: offset, len })
    }

    /// The exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.start + self.len
    }
}
