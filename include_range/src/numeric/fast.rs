//! Table-driven emitter writing into bounded chunks.
//!
//! Every byte value maps to one [`Record`]: up to three digits and a comma,
//! padded to [`RECORD_WIDTH`] bytes and packed into a little-endian `u32`,
//! together with the number of significant bytes. Emitting a byte is one table
//! lookup, one 4-byte copy and one cursor bump; the padding that lands past the
//! cursor is overwritten by the next record.
//!
//! The copy uses the record's native-order bytes, so the strategy is only used
//! on little-endian targets. Payloads of [`MIN_PAYLOAD`] bytes or fewer go to
//! the naive emitter, where the setup cost of the chunk list is not repaid.
use std::io::{self, Read, Seek};

use super::{LIST_CLOSE, LIST_OPEN};
use crate::{
    chunked::{CHUNK_CAPACITY, ChunkWriter, ChunkedText},
    source::{RangeSource, WINDOW_SIZE},
    unit::Frame,
};

/// Width of every table record: `"255,"`.
pub(crate) const RECORD_WIDTH: usize = 4;

/// Largest payload that is always left to the naive emitter.
pub(crate) const MIN_PAYLOAD: u64 = 1024;

const TABLE_IS_NATIVE_ORDER: bool = cfg!(target_endian = "little");

#[derive(Clone, Copy)]
#[repr(C, align(8))]
struct Record {
    text: u32,
    len: u32,
}

const fn record(value: u8) -> Record {
    let mut text = [b' '; RECORD_WIDTH];
    let mut len = 0;
    if value >= 100 {
        text[len] = b'0' + value / 100;
        len += 1;
    }
    if value >= 10 {
        text[len] = b'0' + value / 10 % 10;
        len += 1;
    }
    text[len] = b'0' + value % 10;
    text[len + 1] = b',';
    len += 2;
    Record {
        text: u32::from_le_bytes(text),
        len: len as u32,
    }
}

static TABLE: [Record; 256] = {
    let mut table = [Record { text: 0, len: 0 }; 256];
    let mut value = 0;
    while value < 256 {
        table[value] = record(value as u8);
        value += 1;
    }
    table
};

/// Whether the fast emitter can take a payload of `len` bytes framed by
/// `frame`.
pub(crate) fn is_eligible(len: u64, frame: &Frame) -> bool {
    if !TABLE_IS_NATIVE_ORDER {
        log::debug!("fast emitter unavailable: table byte order does not match the target");
        return false;
    }
    if len <= MIN_PAYLOAD {
        return false;
    }
    // Head and epilogue are each written whole into one chunk.
    let head = frame.head.len() + LIST_OPEN.len();
    let epilogue = LIST_CLOSE.len() + frame.tail.len();
    let fits = head.max(epilogue) + RECORD_WIDTH < CHUNK_CAPACITY - 1;
    if !fits {
        log::debug!("fast emitter unavailable: wrapper text exceeds one chunk");
    }
    fits
}

/// Chunks needed for `len` payload bytes plus the wrapper, assuming every
/// record is full width.
fn estimate_chunks(len: u64, frame: &Frame) -> usize {
    let usable = CHUNK_CAPACITY - 1 - RECORD_WIDTH;
    let payload = usize::try_from(len).unwrap_or(usize::MAX / RECORD_WIDTH) * RECORD_WIDTH;
    let wrapper = frame.head.len() + LIST_OPEN.len() + LIST_CLOSE.len() + frame.tail.len();
    (payload + wrapper) / usable + 2
}

pub(crate) fn encode<R: Read + Seek>(
    source: &mut RangeSource<R>,
    frame: &Frame,
) -> io::Result<ChunkedText> {
    let mut writer = ChunkWriter::with_estimate(estimate_chunks(source.len(), frame));
    writer.write_str(&frame.head);
    writer.write_str(LIST_OPEN);

    let mut window = [0u8; WINDOW_SIZE];
    loop {
        let read = source.read_window(&mut window)?;
        if read == 0 {
            break;
        }
        write_records(&mut writer, &window[..read]);
    }

    let mut epilogue = String::with_capacity(LIST_CLOSE.len() + frame.tail.len());
    epilogue.push_str(LIST_CLOSE);
    epilogue.push_str(&frame.tail);
    writer.write_str(&epilogue);
    Ok(writer.finish())
}

fn write_records(writer: &mut ChunkWriter, mut bytes: &[u8]) {
    while !bytes.is_empty() {
        // Records that fit before the terminator even at full width.
        let fit = writer.room() / RECORD_WIDTH;
        if fit == 0 {
            writer.seal();
            continue;
        }
        let (now, rest) = bytes.split_at(fit.min(bytes.len()));

        let chunk = &mut writer.current;
        let mut pos = writer.pos;
        for &byte in now {
            let record = TABLE[usize::from(byte)];
            chunk[pos..pos + RECORD_WIDTH].copy_from_slice(&record.text.to_ne_bytes());
            pos += record.len as usize;
        }
        writer.pos = pos;
        bytes = rest;
    }
}
