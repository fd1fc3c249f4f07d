//! Generated text stored as a sequence of fixed-capacity chunks.
//!
//! A payload of 1 MiB renders to roughly 4 MiB of source text. Rather than
//! growing one buffer to that size, the fast emitter writes into 64 KiB chunks,
//! each of which stays below the allocation size at which common system
//! allocators switch to dedicated `mmap` regions (128 KiB by default). The
//! chunks are then handed out through [`ChunkedReader`], which implements
//! [`Read`] and [`BufRead`] and walks chunk boundaries transparently.
//!
//! Only [`ChunkedReader::read_remaining`] ever produces one contiguous buffer
//! for the whole text. Writing the text to disk goes through
//! [`ChunkedText::write_to`], chunk by chunk.
use std::io::{self, BufRead, Read, Write};

/// Capacity, in bytes, of every chunk produced by [`ChunkWriter`].
pub const CHUNK_CAPACITY: usize = 64 * 1024;

/// Last byte of every sealed chunk.
const CHUNK_TERMINATOR: u8 = b'\n';

/// Filler between the last record of a sealed chunk and its terminator.
const CHUNK_PADDING: u8 = b' ';

/// Immutable generated text, owned as a list of chunks.
///
/// Every chunk but the last is full. The last holds `tail_len` meaningful bytes;
/// anything after that is scratch space left over from writing.
#[derive(Debug, Clone)]
pub struct ChunkedText {
    chunks: Vec<Box<[u8]>>,
    tail_len: usize,
    len: usize,
}

impl ChunkedText {
    /// Wraps text that was built in one contiguous buffer.
    #[must_use]
    pub fn from_string(text: String) -> Self {
        let len = text.len();
        Self {
            chunks: vec![text.into_bytes().into_boxed_slice()],
            tail_len: len,
            len,
        }
    }

    /// Logical length of the text in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks backing the text.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The meaningful bytes of chunk `index`.
    fn chunk(&self, index: usize) -> &[u8] {
        let chunk = &self.chunks[index];
        if index + 1 == self.chunks.len() {
            &chunk[..self.tail_len]
        } else {
            chunk
        }
    }

    /// Iterates over the meaningful bytes of every chunk, in order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.chunks.len()).map(|index| self.chunk(index))
    }

    /// Returns a reader positioned at the start of the text.
    #[must_use]
    pub const fn reader(&self) -> ChunkedReader<'_> {
        ChunkedReader {
            text: self,
            chunk: 0,
            offset: 0,
            remaining: self.len,
        }
    }

    /// Streams the text into `out` one chunk at a time.
    ///
    /// # Errors
    /// Propagates any error returned by `out`.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for chunk in self.chunks() {
            out.write_all(chunk)?;
        }
        out.flush()
    }
}

/// Sequential reader over a [`ChunkedText`].
#[derive(Debug, Clone)]
pub struct ChunkedReader<'a> {
    text: &'a ChunkedText,
    chunk: usize,
    offset: usize,
    remaining: usize,
}

impl ChunkedReader<'_> {
    /// Bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Moves the cursor past exhausted chunks.
    fn settle(&mut self) {
        while self.remaining > 0 && self.offset == self.text.chunk(self.chunk).len() {
            self.chunk += 1;
            self.offset = 0;
        }
    }

    /// Returns the next byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let mut chunk = self.chunk;
        let mut offset = self.offset;
        while offset == self.text.chunk(chunk).len() {
            chunk += 1;
            offset = 0;
        }
        Some(self.text.chunk(chunk)[offset])
    }

    /// Consumes and returns the next byte.
    pub fn read_unit(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        self.settle();
        let byte = self.text.chunk(self.chunk)[self.offset];
        self.offset += 1;
        self.remaining -= 1;
        Some(byte)
    }

    /// Reads everything that is left into one contiguous buffer.
    ///
    /// This is the only operation that materialises the text as a single
    /// allocation proportional to its size; the caller owns that cost.
    pub fn read_remaining(&mut self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.remaining);
        while self.remaining > 0 {
            self.settle();
            let available = &self.text.chunk(self.chunk)[self.offset..];
            let take = available.len().min(self.remaining);
            out.extend_from_slice(&available[..take]);
            self.offset += take;
            self.remaining -= take;
        }
        out
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() && self.remaining > 0 {
            self.settle();
            let available = &self.text.chunk(self.chunk)[self.offset..];
            let take = available.len().min(buf.len() - written);
            buf[written..written + take].copy_from_slice(&available[..take]);
            written += take;
            self.offset += take;
            self.remaining -= take;
        }
        Ok(written)
    }
}

impl BufRead for ChunkedReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.remaining == 0 {
            return Ok(&[]);
        }
        self.settle();
        Ok(&self.text.chunk(self.chunk)[self.offset..])
    }

    fn consume(&mut self, amt: usize) {
        let amt = amt.min(self.remaining);
        self.offset += amt;
        self.remaining -= amt;
    }
}

/// Builds a [`ChunkedText`] out of [`CHUNK_CAPACITY`]-sized chunks.
///
/// The last byte of every chunk is reserved for [`CHUNK_TERMINATOR`]. Writers
/// check [`room`](Self::room) and call [`seal`](Self::seal) themselves, so no
/// single write ever crosses a chunk boundary.
pub(crate) struct ChunkWriter {
    chunks: Vec<Box<[u8]>>,
    pub(crate) current: Box<[u8]>,
    pub(crate) pos: usize,
}

impl ChunkWriter {
    /// Creates a writer whose chunk list will not reallocate for up to
    /// `estimated_chunks` chunks.
    pub(crate) fn with_estimate(estimated_chunks: usize) -> Self {
        Self {
            chunks: Vec::with_capacity(estimated_chunks),
            current: new_chunk(),
            pos: 0,
        }
    }

    /// Writable bytes left in the current chunk.
    pub(crate) const fn room(&self) -> usize {
        CHUNK_CAPACITY - 1 - self.pos
    }

    /// Writes `text` whole, sealing the current chunk first if it does not fit.
    pub(crate) fn write_str(&mut self, text: &str) {
        debug_assert!(text.len() < CHUNK_CAPACITY);
        if text.len() > self.room() {
            self.seal();
        }
        self.current[self.pos..self.pos + text.len()].copy_from_slice(text.as_bytes());
        self.pos += text.len();
    }

    /// Pads and terminates the current chunk and starts a fresh one.
    pub(crate) fn seal(&mut self) {
        self.current[self.pos..CHUNK_CAPACITY - 1].fill(CHUNK_PADDING);
        self.current[CHUNK_CAPACITY - 1] = CHUNK_TERMINATOR;
        let full = std::mem::replace(&mut self.current, new_chunk());
        self.chunks.push(full);
        self.pos = 0;
    }

    pub(crate) fn finish(mut self) -> ChunkedText {
        let len = self.chunks.len() * CHUNK_CAPACITY + self.pos;
        let tail_len = if self.pos == 0 && !self.chunks.is_empty() {
            CHUNK_CAPACITY
        } else {
            self.chunks.push(self.current);
            self.pos
        };
        ChunkedText {
            chunks: self.chunks,
            tail_len,
            len,
        }
    }
}

fn new_chunk() -> Box<[u8]> {
    vec![0; CHUNK_CAPACITY].into_boxed_slice()
}
