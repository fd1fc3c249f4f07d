//! Picks and runs the encoding strategy for one request.
use std::{
    fs::File,
    io::{Read, Seek},
};

use crate::{
    bounds::ByteRange,
    chunked::ChunkedText,
    diagnostic::Diagnostic,
    numeric::{fast, naive},
    request::EmbedRequest,
    source::RangeSource,
    unit::Frame,
};

/// How the bytes of a request were rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `"...".as_bytes()`
    Utf8Literal,
    /// `&[..]` built in one contiguous buffer.
    NaiveNumericList,
    /// `&[..]` built from lookup-table records in bounded chunks.
    FastNumericList,
}

/// The complete source text of one output unit.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub strategy: Strategy,
    pub text: ChunkedText,
}

/// Encodes one request.
///
/// `default_max_size` applies when the request has no override of its own;
/// `None` falls back to [`DEFAULT_MAX_SIZE`](crate::DEFAULT_MAX_SIZE).
///
/// # Errors
/// Returns a diagnostic if the file is missing, the range is out of bounds or
/// too large, or reading the file fails.
pub fn encode(
    request: &EmbedRequest,
    default_max_size: Option<u64>,
) -> Result<Encoded, Diagnostic> {
    let path = request.path();
    if !path.is_file() {
        return Err(Diagnostic::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();

    let range = ByteRange::resolve(
        request.offset,
        request.length,
        request.max_size.or(default_max_size),
        file_len,
    )?;
    let source_name = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    let frame = request.shape.frame(&source_name);

    let encoded = encode_range(file, range, &frame, request.utf8_literal)?;
    log::debug!(
        "{}: {} bytes at offset {} as {:?} ({} chunks)",
        path.display(),
        range.len,
        range.start,
        encoded.strategy,
        encoded.text.chunk_count()
    );
    Ok(encoded)
}

/// Tries the string literal first, then the fast list, then the naive list.
pub(crate) fn encode_range<R: Read + Seek>(
    reader: R,
    range: ByteRange,
    frame: &Frame,
    utf8_literal: bool,
) -> Result<Encoded, Diagnostic> {
    let mut source = RangeSource::new(reader, range)?;

    if utf8_literal {
        if let Some(text) = crate::utf8::encode(&mut source, frame)? {
            return Ok(Encoded {
                strategy: Strategy::Utf8Literal,
                text,
            });
        }
        log::trace!("falling back to a numeric list");
    }

    if fast::is_eligible(range.len, frame) {
        Ok(Encoded {
            strategy: Strategy::FastNumericList,
            text: fast::encode(&mut source, frame)?,
        })
    } else {
        Ok(Encoded {
            strategy: Strategy::NaiveNumericList,
            text: naive::encode(&mut source, frame)?,
        })
    }
}
