//! Reference emitter: one growing buffer, formatted byte by byte.
//!
//! Works for every payload size and byte order, and is the fallback whenever
//! [`fast`](super::fast) is not eligible.
use std::io::{self, Read, Seek};

use super::{LIST_CLOSE, LIST_OPEN};
use crate::{
    chunked::ChunkedText,
    source::{RangeSource, WINDOW_SIZE},
    unit::Frame,
};

pub(crate) fn encode<R: Read + Seek>(
    source: &mut RangeSource<R>,
    frame: &Frame,
) -> io::Result<ChunkedText> {
    let mut out = String::with_capacity(frame.head.len() + LIST_OPEN.len());
    out.push_str(&frame.head);
    out.push_str(LIST_OPEN);

    let mut digits = itoa::Buffer::new();
    let mut window = [0u8; WINDOW_SIZE];
    loop {
        let read = source.read_window(&mut window)?;
        if read == 0 {
            break;
        }
        for &byte in &window[..read] {
            out.push_str(digits.format(byte));
            out.push(',');
        }
    }

    out.push_str(LIST_CLOSE);
    out.push_str(&frame.tail);
    Ok(ChunkedText::from_string(out))
}
